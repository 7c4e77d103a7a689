//! Integration tests for the batch scrub pipeline on small patient tables

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tabscrub::anonymization::{
    AesGcmCipher, Redactor, ScrubEngine, SymmetricCipher, SynthCategory, SyntheticGenerator,
    TransformRequest,
};
use tabscrub::domain::{Column, ColumnType, ScrubError, Table, Value};

/// Generator that numbers its outputs and counts calls
#[derive(Default)]
struct CountingGenerator {
    calls: AtomicUsize,
}

impl SyntheticGenerator for CountingGenerator {
    fn generate(&self, _category: SynthCategory) -> Value {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Value::Str(format!("fake-{n}"))
    }
}

/// Redactor that upper-cases its input and counts calls
#[derive(Default)]
struct CountingRedactor {
    calls: AtomicUsize,
}

impl Redactor for CountingRedactor {
    fn redact(&self, text: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        text.to_uppercase()
    }
}

fn patients() -> Table {
    Table::new(vec![
        Column::new(
            "name",
            ColumnType::String,
            vec![
                "Ann Lee".into(),
                "Bo Chen".into(),
                "Ann Lee".into(),
                Value::Null,
                "Ann Lee".into(),
            ],
        ),
        Column::new(
            "ssn",
            ColumnType::String,
            vec![
                "123-45-6789".into(),
                "987-65-4321".into(),
                "123-45-6789".into(),
                "555-12-0000".into(),
                "123-45-6789".into(),
            ],
        ),
        Column::new(
            "age",
            ColumnType::Integer,
            vec![
                Value::Int(34),
                Value::Int(58),
                Value::Int(34),
                Value::Int(71),
                Value::Int(34),
            ],
        ),
        Column::new(
            "zip",
            ColumnType::Integer,
            vec![
                Value::Int(94110),
                Value::Int(10001),
                Value::Int(94110),
                Value::Int(60614),
                Value::Int(94110),
            ],
        ),
        Column::new(
            "notes",
            ColumnType::String,
            vec![
                "SSN 123-45-6789 on file".into(),
                "call 555-123-4567".into(),
                "SSN 123-45-6789 on file".into(),
                Value::Null,
                "no contact".into(),
            ],
        ),
    ])
    .unwrap()
}

#[test]
fn test_encrypt_then_decrypt_restores_original_columns() {
    let table = patients();
    let engine = ScrubEngine::new(&table).unwrap();

    let encrypted = engine
        .apply_all(
            &table,
            &[
                TransformRequest::encrypt("ssn"),
                TransformRequest::encrypt("age"),
            ],
        )
        .unwrap();
    assert_eq!(encrypted.table.column("ssn").unwrap().dtype(), ColumnType::Bytes);
    assert_ne!(encrypted.table.column("ssn").unwrap(), table.column("ssn").unwrap());

    let key = engine.key().clone();
    let restored = engine
        .apply_all(
            &encrypted.table,
            &[
                TransformRequest::decrypt("ssn", key.clone()),
                TransformRequest::decrypt("age", key),
            ],
        )
        .unwrap();

    assert_eq!(restored.table, table);
    assert!(restored.report.is_complete());
}

#[test]
fn test_equal_plaintexts_share_one_ciphertext() {
    let table = patients();
    let engine = ScrubEngine::new(&table).unwrap();

    let outcome = engine
        .apply_all(&table, &[TransformRequest::encrypt("ssn")])
        .unwrap();
    let values = outcome.table.column("ssn").unwrap().values().to_vec();

    assert_eq!(values[0], values[2]);
    assert_eq!(values[0], values[4]);
    assert_ne!(values[0], values[1]);
    assert_eq!(outcome.report.applied[0].distinct_values, 3);
}

#[test]
fn test_decrypt_with_wrong_key_aborts_batch() {
    let table = patients();
    let engine = ScrubEngine::new(&table).unwrap();
    let encrypted = engine
        .apply_all(&table, &[TransformRequest::encrypt("ssn")])
        .unwrap();

    let other_key = AesGcmCipher::new().generate_key().unwrap();
    let result = engine.apply_all(
        &encrypted.table,
        &[
            TransformRequest::redact("notes"),
            TransformRequest::decrypt("ssn", other_key),
        ],
    );

    assert!(matches!(result, Err(ScrubError::Decryption(_))));
}

#[test]
fn test_partial_batch_skips_only_bad_requests() {
    let table = patients();
    let engine = ScrubEngine::new(&table).unwrap();

    let outcome = engine
        .apply_all(
            &table,
            &[
                TransformRequest::new("age", "bogus"),
                TransformRequest::encrypt("ssn"),
                TransformRequest::synthesize("name", "name"),
                TransformRequest::new("zip", "truncate"),
                TransformRequest::truncate("zip", 2, true),
                TransformRequest::redact("missing_column"),
                TransformRequest::redact("notes"),
            ],
        )
        .unwrap();

    let report = &outcome.report;
    assert_eq!(report.applied.len(), 4);
    assert_eq!(report.skipped.len(), 3);
    assert_eq!(report.skipped[0].kind, "bogus");
    assert!(report.skipped[1].reason.contains("count"));
    assert_eq!(report.skipped[2].column, "missing_column");

    // Column untouched by the skipped request
    assert_eq!(outcome.table.column("age").unwrap(), table.column("age").unwrap());
    assert_eq!(
        outcome.table.column("zip").unwrap().values()[0],
        Value::Int(941)
    );
    assert_eq!(
        outcome.table.column("notes").unwrap().values()[1],
        Value::from("call {{PHONE}}")
    );
}

#[test]
fn test_synthesize_calls_generator_once_per_distinct_value() {
    let table = patients();
    let generator = Arc::new(CountingGenerator::default());
    let engine = ScrubEngine::new(&table)
        .unwrap()
        .with_generator(generator.clone());

    let outcome = engine
        .apply_all(&table, &[TransformRequest::synthesize("name", "name")])
        .unwrap();

    // "Ann Lee", "Bo Chen" and the missing value
    assert_eq!(generator.calls.load(Ordering::SeqCst), 3);

    let names = outcome.table.column("name").unwrap().values();
    assert_eq!(names[0], names[2]);
    assert_eq!(names[0], names[4]);
    assert_ne!(names[0], names[1]);
    assert!(names.iter().all(|v| !v.is_null()));
}

#[test]
fn test_redact_calls_redactor_once_per_distinct_text() {
    let table = patients();
    let redactor = Arc::new(CountingRedactor::default());
    let engine = ScrubEngine::new(&table)
        .unwrap()
        .with_redactor(redactor.clone());

    let outcome = engine
        .apply_all(&table, &[TransformRequest::redact("notes")])
        .unwrap();

    // Three distinct strings; the missing value never reaches the redactor
    assert_eq!(redactor.calls.load(Ordering::SeqCst), 3);
    let notes = outcome.table.column("notes").unwrap().values();
    assert_eq!(notes[0], Value::from("SSN 123-45-6789 ON FILE"));
    assert_eq!(notes[3], Value::Null);
}

#[test]
fn test_default_redactor_distinguishes_ssn_and_phone() {
    let table = patients();
    let engine = ScrubEngine::new(&table).unwrap();

    let outcome = engine
        .apply_all(&table, &[TransformRequest::redact("notes")])
        .unwrap();
    let notes = outcome.table.column("notes").unwrap().values();

    assert_eq!(notes[0], Value::from("SSN {{SSN}} on file"));
    assert_eq!(notes[1], Value::from("call {{PHONE}}"));
    assert_eq!(notes[4], Value::from("no contact"));
}

#[test]
fn test_truncation_variants() {
    let table = Table::new(vec![
        Column::new(
            "zip",
            ColumnType::Integer,
            vec![Value::Int(94110), Value::Int(10001)],
        ),
        Column::new(
            "code",
            ColumnType::String,
            vec!["ABCDEF".into(), "XY".into()],
        ),
    ])
    .unwrap();
    let engine = ScrubEngine::new(&table).unwrap();

    let outcome = engine
        .apply_all(
            &table,
            &[
                TransformRequest::truncate("zip", 3, false),
                TransformRequest::truncate("code", 4, true),
            ],
        )
        .unwrap();

    assert_eq!(
        outcome.table.column("zip").unwrap().values(),
        &[Value::Int(10), Value::Int(1)]
    );
    assert_eq!(
        outcome.table.column("code").unwrap().values(),
        &[Value::from("AB"), Value::from("")]
    );
}

#[test]
fn test_input_table_is_not_modified() {
    let table = patients();
    let snapshot = table.clone();
    let engine = ScrubEngine::new(&table).unwrap();

    engine
        .apply_all(
            &table,
            &[
                TransformRequest::encrypt("ssn"),
                TransformRequest::redact("notes"),
            ],
        )
        .unwrap();

    assert_eq!(table, snapshot);
}
