//! Transform-once, replace-many
//!
//! A column of N rows usually holds far fewer distinct values. The mapper runs
//! the codec once per distinct value and the resulting [`ValueMapping`] is
//! broadcast back over every row.

use crate::anonymization::codec::ValueCodec;
use crate::anonymization::registry::TypeRegistry;
use crate::anonymization::request::TransformOp;
use crate::domain::{Column, ColumnType, Result, Value};
use std::collections::HashMap;

/// Distinct value to replacement, for one column and one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMapping {
    entries: HashMap<Value, Value>,
}

impl ValueMapping {
    /// Replacement for `value`, if it was in the column when the mapping was built
    pub fn get(&self, value: &Value) -> Option<&Value> {
        self.entries.get(value)
    }

    /// Number of distinct values mapped
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `value` is in the mapping's domain
    pub fn contains(&self, value: &Value) -> bool {
        self.entries.contains_key(value)
    }

    /// Map every value through the mapping; unmapped values pass through
    pub fn apply(&self, values: &[Value]) -> Vec<Value> {
        values
            .iter()
            .map(|v| self.entries.get(v).unwrap_or(v).clone())
            .collect()
    }
}

/// Builds a [`ValueMapping`] for one column
pub struct UniqueValueMapper<'a> {
    codec: &'a ValueCodec,
    registry: &'a TypeRegistry,
}

impl<'a> UniqueValueMapper<'a> {
    /// Create a mapper over `codec`, casting through `registry`
    pub fn new(codec: &'a ValueCodec, registry: &'a TypeRegistry) -> Self {
        Self { codec, registry }
    }

    /// Type decrypted values are cast to for `column`
    ///
    /// An explicit target wins over the registry entry captured at engine
    /// creation. Without either, values stay strings.
    pub fn decrypt_target(&self, column: &str, explicit: Option<ColumnType>) -> Option<ColumnType> {
        explicit.or_else(|| self.registry.get(column))
    }

    /// Run `op` once for every distinct value of `column`
    ///
    /// # Errors
    ///
    /// Propagates the first codec failure (decryption or type errors).
    pub fn build(&self, column: &Column, op: &TransformOp) -> Result<ValueMapping> {
        let unique = column.unique_values();
        let mut entries = HashMap::with_capacity(unique.len());

        match op {
            TransformOp::Encrypt => {
                for value in unique {
                    let replacement = self.codec.encrypt(&value)?;
                    entries.insert(value, replacement);
                }
            }
            TransformOp::Decrypt { key, target_type } => {
                let target = self.decrypt_target(column.name(), *target_type);
                for value in unique {
                    let replacement = self.codec.decrypt(&value, target, key)?;
                    entries.insert(value, replacement);
                }
            }
            TransformOp::Synthesize { category } => {
                for value in unique {
                    entries.insert(value, self.codec.synthesize(*category));
                }
            }
            TransformOp::Truncate { count, from_end } => {
                let declared = self
                    .registry
                    .get(column.name())
                    .unwrap_or_else(|| column.dtype());
                for value in unique {
                    let replacement = ValueCodec::truncate(&value, declared, *count, *from_end);
                    entries.insert(value, replacement);
                }
            }
            TransformOp::Redact => {
                for value in unique {
                    let replacement = self.codec.redact(&value);
                    entries.insert(value, replacement);
                }
            }
        }

        tracing::debug!(
            column = column.name(),
            kind = %op.kind(),
            distinct_values = entries.len(),
            "Built value mapping"
        );

        Ok(ValueMapping { entries })
    }
}
