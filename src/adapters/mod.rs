//! External system integrations for tabscrub.
//!
//! - [`csv_io`] - CSV files as [`Table`](crate::domain::Table)s
//!
//! # Example
//!
//! ```rust,no_run
//! use tabscrub::adapters::csv_io::{read_table, write_table, CsvOptions};
//! use std::path::Path;
//!
//! # fn example() -> tabscrub::domain::Result<()> {
//! let table = read_table(Path::new("patients.csv"), &CsvOptions::default())?;
//! write_table(&table, Path::new("copy.csv"), b',')?;
//! # Ok(())
//! # }
//! ```

pub mod csv_io;
