// Tabscrub - Column-level anonymization for tabular data
// Copyright (c) 2025 Tabscrub Contributors
// Licensed under the MIT License

//! # Tabscrub - column-level anonymization for tabular data
//!
//! Tabscrub applies an ordered batch of per-column transforms to a table:
//! reversible encryption, consistent synthetic replacement, truncation and
//! pattern-based redaction of free text.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Value codec, unique-value mapping, column and batch transforms
//! - [`adapters`] - CSV input and output
//! - [`domain`] - Values, column types, tables and errors
//! - [`config`] - Job configuration
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use tabscrub::anonymization::{ScrubEngine, TransformRequest};
//! use tabscrub::domain::{Column, ColumnType, Table, Value};
//!
//! # fn example() -> tabscrub::domain::Result<()> {
//! let table = Table::new(vec![
//!     Column::new("ssn", ColumnType::String, vec![Value::from("123-45-6789")]),
//!     Column::new("zip", ColumnType::Integer, vec![Value::Int(94110)]),
//! ])?;
//!
//! let engine = ScrubEngine::new(&table)?;
//! let outcome = engine.apply_all(
//!     &table,
//!     &[
//!         TransformRequest::encrypt("ssn"),
//!         TransformRequest::truncate("zip", 2, true),
//!     ],
//! )?;
//!
//! assert_eq!(outcome.table.column("zip")?.values()[0], Value::Int(941));
//! assert!(outcome.report.is_complete());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with a
//! [`domain::ScrubError`]. Requests that cannot be interpreted (unknown kind
//! or synthesize category, missing column or parameter) are skipped by the
//! batch and listed in the report; data errors such as a failed decryption
//! abort the batch.

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
