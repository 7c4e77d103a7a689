//! In-memory tables
//!
//! A [`Table`] is an ordered set of equally long, named, typed [`Column`]s.
//! Transformations never mutate a table in place: they produce new columns,
//! and the batch transformer swaps them into a copy.

use crate::domain::{ColumnType, Result, ScrubError, Value};
use std::collections::HashSet;

/// A named, typed sequence of values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: ColumnType,
    values: Vec<Value>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, dtype: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared element type
    pub fn dtype(&self) -> ColumnType {
        self.dtype
    }

    /// Row values
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct values, in order of first appearance
    pub fn unique_values(&self) -> Vec<Value> {
        let mut seen = HashSet::with_capacity(self.values.len());
        self.values
            .iter()
            .filter(|v| seen.insert(*v))
            .cloned()
            .collect()
    }

    /// Consume the column, returning its values
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// A table of equally long columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table from columns
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Validation`] if the columns differ in length or a
    /// column name appears twice.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            if let Some(ragged) = columns.iter().find(|c| c.len() != first.len()) {
                return Err(ScrubError::Validation(format!(
                    "Column '{}' has {} rows, expected {}",
                    ragged.name(),
                    ragged.len(),
                    first.len()
                )));
            }
        }

        let mut names = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !names.insert(c.name())) {
            return Err(ScrubError::Validation(format!(
                "Duplicate column name '{}'",
                dup.name()
            )));
        }

        Ok(Self { columns })
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Number of rows (zero for a table without columns)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| ScrubError::ColumnNotFound(name.to_string()))
    }

    /// Distinct values of the named column
    pub fn unique_values(&self, name: &str) -> Result<Vec<Value>> {
        Ok(self.column(name)?.unique_values())
    }

    /// Replace the named column
    ///
    /// The replacement keeps the slot of the original column and takes its
    /// name; its type may differ.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing or the row count differs.
    pub fn replace_column(&mut self, name: &str, replacement: Column) -> Result<()> {
        let rows = self.row_count();
        let slot = self
            .columns
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| ScrubError::ColumnNotFound(name.to_string()))?;

        if replacement.len() != rows {
            return Err(ScrubError::Validation(format!(
                "Replacement for column '{name}' has {} rows, expected {rows}",
                replacement.len()
            )));
        }

        *slot = Column::new(name, replacement.dtype(), replacement.into_values());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Column::new(
                "name",
                ColumnType::String,
                vec!["Ann".into(), "Bob".into(), "Ann".into()],
            ),
            Column::new(
                "age",
                ColumnType::Integer,
                vec![Value::Int(30), Value::Int(41), Value::Null],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_unique_values_first_seen_order() {
        let table = sample();
        let unique = table.unique_values("name").unwrap();
        assert_eq!(unique, vec![Value::from("Ann"), Value::from("Bob")]);
    }

    #[test]
    fn test_missing_column() {
        let table = sample();
        assert!(matches!(
            table.column("ssn"),
            Err(ScrubError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let result = Table::new(vec![
            Column::new("a", ColumnType::String, vec!["x".into()]),
            Column::new("b", ColumnType::String, vec![]),
        ]);
        assert!(matches!(result, Err(ScrubError::Validation(_))));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Table::new(vec![
            Column::new("a", ColumnType::String, vec![]),
            Column::new("a", ColumnType::Integer, vec![]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_replace_column_keeps_slot_and_copy_is_independent() {
        let original = sample();
        let mut copy = original.clone();
        let replacement = Column::new(
            "ignored",
            ColumnType::Bytes,
            vec![Value::Bytes(vec![1]), Value::Bytes(vec![2]), Value::Bytes(vec![1])],
        );

        copy.replace_column("name", replacement).unwrap();

        assert_eq!(copy.column_names(), vec!["name", "age"]);
        assert_eq!(copy.column("name").unwrap().dtype(), ColumnType::Bytes);
        assert_eq!(original.column("name").unwrap().dtype(), ColumnType::String);
    }

    #[test]
    fn test_replace_column_rejects_wrong_length() {
        let mut table = sample();
        let short = Column::new("name", ColumnType::String, vec!["x".into()]);
        assert!(table.replace_column("name", short).is_err());
    }
}
