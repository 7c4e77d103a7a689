//! Domain models and types for tabscrub.
//!
//! The domain layer provides:
//! - **Values and types** ([`Value`], [`ColumnType`])
//! - **Tables** ([`Table`], [`Column`])
//! - **Error types** ([`ScrubError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use tabscrub::domain::{Column, ColumnType, Table, Value};
//!
//! # fn example() -> tabscrub::domain::Result<()> {
//! let table = Table::new(vec![Column::new(
//!     "zip",
//!     ColumnType::Integer,
//!     vec![Value::Int(90210), Value::Int(10001), Value::Int(90210)],
//! )])?;
//!
//! assert_eq!(table.unique_values("zip")?.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod result;
pub mod table;
pub mod value;

// Re-export commonly used types for convenience
pub use errors::ScrubError;
pub use result::Result;
pub use table::{Column, Table};
pub use value::{ColumnType, Value};
