//! Declared column types, captured when an engine is created

use crate::domain::{ColumnType, Table};
use std::collections::HashMap;

/// Snapshot of each column's declared type
///
/// Decryption casts plaintext back through this registry, so it must describe
/// the table as it was *before* encryption replaced the column with bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeRegistry {
    types: HashMap<String, ColumnType>,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the declared type of every column in `table`
    pub fn capture(table: &Table) -> Self {
        let types = table
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), c.dtype()))
            .collect();
        Self { types }
    }

    /// Add or override the entry for `column`
    pub fn register(&mut self, column: impl Into<String>, dtype: ColumnType) {
        self.types.insert(column.into(), dtype);
    }

    /// Declared type of `column`, if known
    pub fn get(&self, column: &str) -> Option<ColumnType> {
        self.types.get(column).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, Value};

    #[test]
    fn test_capture_and_override() {
        let table = Table::new(vec![
            Column::new("age", ColumnType::Integer, vec![Value::Int(3)]),
            Column::new("dob", ColumnType::Date, vec![Value::Null]),
        ])
        .unwrap();

        let mut registry = TypeRegistry::capture(&table);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("age"), Some(ColumnType::Integer));
        assert_eq!(registry.get("ssn"), None);

        registry.register("age", ColumnType::Float);
        assert_eq!(registry.get("age"), Some(ColumnType::Float));
    }
}
