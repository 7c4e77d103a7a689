//! CSV table reader and writer
//!
//! The header row names the columns. Cells are cast with the configured type
//! of their column: an empty cell is a missing value and `bytes` cells hold
//! standard base64. Values are written in their canonical string form, so a
//! scrubbed file reads back with the same declared types.
//!
//! CSV has no separate spelling for a missing value, so [`Value::Null`] and the
//! empty string are both written as an empty cell and both read back as
//! `Null`. A string column truncated to `""` therefore reads back as missing.

use crate::domain::{Column, ColumnType, Result, ScrubError, Table, Value};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

/// How to read a CSV table
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,

    /// Declared column types; unlisted columns are strings
    pub column_types: BTreeMap<String, ColumnType>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            column_types: BTreeMap::new(),
        }
    }
}

impl CsvOptions {
    /// Options with the given delimiter and column types
    pub fn new(delimiter: u8, column_types: BTreeMap<String, ColumnType>) -> Self {
        Self {
            delimiter,
            column_types,
        }
    }

    fn column_type(&self, column: &str) -> ColumnType {
        self.column_types.get(column).copied().unwrap_or_default()
    }
}

/// Read a table from a CSV file
///
/// # Errors
///
/// Returns [`ScrubError::Io`] if the file does not exist, [`ScrubError::Csv`]
/// for malformed CSV, and [`ScrubError::Validation`] for a cell that does not
/// parse as its column's type.
pub fn read_table(path: &Path, options: &CsvOptions) -> Result<Table> {
    if !path.exists() {
        return Err(ScrubError::Io(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    let file = std::fs::File::open(path)?;
    let table = read_table_from(file, options)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.columns().len(),
        "Read CSV table"
    );
    Ok(table)
}

/// Read a table from any CSV source
pub fn read_table_from<R: Read>(source: R, options: &CsvOptions) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let types: Vec<ColumnType> = headers.iter().map(|h| options.column_type(h)).collect();
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        for (idx, cell) in record.iter().enumerate() {
            let value = parse_cell(cell, types[idx]).map_err(|e| {
                ScrubError::Validation(format!(
                    "Row {} column '{}': {e}",
                    row + 1,
                    headers[idx]
                ))
            })?;
            columns[idx].push(value);
        }
    }

    Table::new(
        headers
            .into_iter()
            .zip(types)
            .zip(columns)
            .map(|((name, dtype), values)| Column::new(name, dtype, values))
            .collect(),
    )
}

fn parse_cell(cell: &str, dtype: ColumnType) -> Result<Value> {
    if cell.is_empty() {
        return Ok(Value::Null);
    }

    dtype.cast(cell)
}

/// Write a table to a CSV file, creating parent directories
pub fn write_table(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    write_table_to(table, file, delimiter)?;
    tracing::debug!(path = %path.display(), rows = table.row_count(), "Wrote CSV table");
    Ok(())
}

/// Write a table to any CSV sink
pub fn write_table_to<W: Write>(table: &Table, sink: W, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(sink);

    writer.write_record(table.column_names())?;

    let mut record: Vec<String> = Vec::with_capacity(table.columns().len());
    for row in 0..table.row_count() {
        record.clear();
        record.extend(table.columns().iter().map(|c| c.values()[row].to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
