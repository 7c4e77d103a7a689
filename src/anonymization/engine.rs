//! Batch transformation engine
//!
//! [`ScrubEngine`] owns a key, the type registry captured from the table it was
//! created for, and the collaborators used by the codec. [`ScrubEngine::apply_all`]
//! folds an ordered list of requests over a copy of a table.
//!
//! # Examples
//!
//! ```no_run
//! use tabscrub::anonymization::{ScrubEngine, TransformRequest};
//! use tabscrub::domain::{Column, ColumnType, Table};
//!
//! # fn example() -> tabscrub::domain::Result<()> {
//! let table = Table::new(vec![Column::new(
//!     "ssn",
//!     ColumnType::String,
//!     vec!["123-45-6789".into()],
//! )])?;
//!
//! let engine = ScrubEngine::new(&table)?;
//! let outcome = engine.apply_all(&table, &[TransformRequest::encrypt("ssn")])?;
//!
//! let key = engine.key().clone();
//! let restored = engine.apply_all(
//!     &outcome.table,
//!     &[TransformRequest::decrypt("ssn", key)],
//! )?;
//! assert_eq!(restored.table, table);
//! # Ok(())
//! # }
//! ```

use crate::anonymization::cipher::{AesGcmCipher, CipherKey, SymmetricCipher};
use crate::anonymization::codec::ValueCodec;
use crate::anonymization::column::ColumnTransformer;
use crate::anonymization::redactor::Redactor;
use crate::anonymization::registry::TypeRegistry;
use crate::anonymization::report::{AppliedTransform, BatchReport};
use crate::anonymization::request::TransformRequest;
use crate::anonymization::synth::SyntheticGenerator;
use crate::domain::{Column, Result, Table};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Result of a batch run
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Transformed copy of the input table
    pub table: Table,

    /// Applied and skipped requests
    pub report: BatchReport,
}

/// Batch transformer bound to one key
///
/// The key is read-only after construction, so an engine can be shared across
/// threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ScrubEngine {
    codec: ValueCodec,
    registry: TypeRegistry,
}

impl ScrubEngine {
    /// Create an engine for `table` with a freshly generated key
    ///
    /// # Errors
    ///
    /// Returns an error if key generation fails or the built-in redaction
    /// patterns cannot be loaded.
    pub fn new(table: &Table) -> Result<Self> {
        let key = AesGcmCipher::new().generate_key()?;
        Self::with_key(table, key)
    }

    /// Create an engine for `table` using an existing key
    pub fn with_key(table: &Table, key: CipherKey) -> Result<Self> {
        Ok(Self::with_codec(table, ValueCodec::new(key)?))
    }

    /// Create an engine for `table` around a preconfigured codec
    pub fn with_codec(table: &Table, codec: ValueCodec) -> Self {
        let registry = TypeRegistry::capture(table);
        tracing::debug!(
            columns = registry.len(),
            key = %codec.key().fingerprint(),
            "Scrub engine created"
        );
        Self { codec, registry }
    }

    /// Replace the synthetic value generator
    pub fn with_generator(mut self, generator: Arc<dyn SyntheticGenerator>) -> Self {
        self.codec = self.codec.with_generator(generator);
        self
    }

    /// Replace the redactor
    pub fn with_redactor(mut self, redactor: Arc<dyn Redactor>) -> Self {
        self.codec = self.codec.with_redactor(redactor);
        self
    }

    /// Key used for encryption
    pub fn key(&self) -> &CipherKey {
        self.codec.key()
    }

    /// Write the raw key bytes to `path`
    pub fn export_key(&self, path: impl AsRef<Path>) -> Result<()> {
        self.codec.key().export_to(path)
    }

    /// Declared types captured at construction
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Transform a single column without touching `table`
    pub fn transform_column(&self, table: &Table, request: &TransformRequest) -> Result<Column> {
        ColumnTransformer::new(&self.codec, &self.registry).apply(table, request)
    }

    /// Apply `requests` in order to a copy of `table`
    ///
    /// Requests failing with a request error (unknown kind, missing parameter,
    /// missing column, unknown synthesize category) are recorded as skipped and
    /// the batch continues. Any other error aborts the batch and is returned.
    pub fn apply_all(&self, table: &Table, requests: &[TransformRequest]) -> Result<BatchOutcome> {
        let transformer = ColumnTransformer::new(&self.codec, &self.registry);
        let mut working = table.clone();
        let mut report = BatchReport::new(table.row_count());

        for request in requests {
            let start = Instant::now();
            match transformer.transform(&working, request) {
                Ok(transformed) => {
                    let rows = transformed.column.len();
                    let kind = transformed.kind;
                    let distinct_values = transformed.distinct_values;
                    working.replace_column(&request.column, transformed.column)?;

                    let elapsed = start.elapsed();
                    crate::log_transform_applied!(
                        request.column,
                        kind,
                        rows,
                        distinct_values,
                        elapsed
                    );
                    report.record_applied(AppliedTransform {
                        column: request.column.clone(),
                        kind: kind.name().to_string(),
                        rows,
                        distinct_values,
                        elapsed_ms: elapsed.as_millis() as u64,
                    });
                }
                Err(e) if e.is_request_error() => {
                    crate::log_request_skipped!(request.column, request.kind, e);
                    report.record_skipped(&request.column, &request.kind, &e);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "Batch complete"
        );

        Ok(BatchOutcome {
            table: working,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnType, ScrubError, Value};

    fn patients() -> Table {
        Table::new(vec![
            Column::new(
                "name",
                ColumnType::String,
                vec!["Ann Lee".into(), "Bo Chen".into(), "Ann Lee".into()],
            ),
            Column::new(
                "age",
                ColumnType::Integer,
                vec![Value::Int(34), Value::Int(58), Value::Int(34)],
            ),
            Column::new(
                "zip",
                ColumnType::String,
                vec!["94110".into(), "10001".into(), "94110".into()],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScrubEngine>();
    }

    #[test]
    fn test_round_trip_restores_table() {
        let table = patients();
        let engine = ScrubEngine::new(&table).unwrap();

        let encrypted = engine
            .apply_all(
                &table,
                &[TransformRequest::encrypt("name"), TransformRequest::encrypt("age")],
            )
            .unwrap();
        assert_ne!(encrypted.table, table);

        let key = engine.key().clone();
        let restored = engine
            .apply_all(
                &encrypted.table,
                &[
                    TransformRequest::decrypt("name", key.clone()),
                    TransformRequest::decrypt("age", key),
                ],
            )
            .unwrap();
        assert_eq!(restored.table, table);
    }

    #[test]
    fn test_skips_request_errors() {
        let table = patients();
        let engine = ScrubEngine::new(&table).unwrap();
        let outcome = engine
            .apply_all(
                &table,
                &[
                    TransformRequest::new("zip", "bogus"),
                    TransformRequest::new("zip", "truncate"),
                    TransformRequest::redact("missing"),
                    TransformRequest::truncate("zip", 2, true),
                ],
            )
            .unwrap();

        assert_eq!(outcome.report.skipped.len(), 3);
        assert_eq!(outcome.report.applied.len(), 1);
        assert_eq!(
            outcome.table.column("zip").unwrap().values()[0],
            Value::from("941")
        );
    }

    #[test]
    fn test_unknown_category_is_skipped() {
        let table = patients();
        let engine = ScrubEngine::new(&table).unwrap();
        let outcome = engine
            .apply_all(
                &table,
                &[
                    TransformRequest::synthesize("name", "dog_breed"),
                    TransformRequest::redact("zip"),
                    TransformRequest::truncate("zip", 2, true),
                ],
            )
            .unwrap();

        assert_eq!(outcome.report.skipped.len(), 1);
        assert_eq!(outcome.report.skipped[0].column, "name");
        assert!(outcome.report.skipped[0].reason.contains("dog_breed"));
        assert_eq!(outcome.report.applied.len(), 2);
        assert_eq!(outcome.table.column("name").unwrap(), table.column("name").unwrap());
        assert_eq!(
            outcome.table.column("zip").unwrap().values()[0],
            Value::from("941")
        );
    }

    #[test]
    fn test_transform_column_raises_request_errors_directly() {
        let table = patients();
        let engine = ScrubEngine::new(&table).unwrap();

        let err = engine
            .transform_column(&table, &TransformRequest::new("zip", "bogus"))
            .unwrap_err();
        assert!(matches!(err, ScrubError::UnknownTransformKind(ref k) if k == "bogus"));

        let column = engine
            .transform_column(&table, &TransformRequest::truncate("zip", 3, false))
            .unwrap();
        assert_eq!(column.values()[0], Value::from("10"));
        assert_eq!(table.column("zip").unwrap().values()[0], Value::from("94110"));
    }

    #[test]
    fn test_data_errors_propagate() {
        let table = patients();
        let engine = ScrubEngine::new(&table).unwrap();
        let key = engine.key().clone();

        let err = engine
            .apply_all(&table, &[TransformRequest::decrypt("name", key)])
            .unwrap_err();
        assert!(matches!(err, ScrubError::Type(_)));
    }

    #[test]
    fn test_repeated_column_sees_previous_output() {
        let table = patients();
        let engine = ScrubEngine::new(&table).unwrap();
        let outcome = engine
            .apply_all(
                &table,
                &[
                    TransformRequest::truncate("zip", 1, true),
                    TransformRequest::truncate("zip", 1, true),
                ],
            )
            .unwrap();
        assert_eq!(
            outcome.table.column("zip").unwrap().values()[1],
            Value::from("100")
        );
    }

    #[test]
    fn test_input_table_unchanged() {
        let table = patients();
        let before = table.clone();
        let engine = ScrubEngine::new(&table).unwrap();
        engine
            .apply_all(&table, &[TransformRequest::synthesize("name", "name")])
            .unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_independent_keys() {
        let table = patients();
        let a = ScrubEngine::new(&table).unwrap();
        let b = ScrubEngine::new(&table).unwrap();
        assert_ne!(a.key(), b.key());
    }
}
