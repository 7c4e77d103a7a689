//! Column anonymization
//!
//! # Architecture
//!
//! Leaves first:
//! - **Codec** ([`ValueCodec`]): one value in, one replacement out, per kind
//! - **Mapper** ([`UniqueValueMapper`]): one codec call per distinct column value
//! - **Column** ([`ColumnTransformer`]): validates a request and rebuilds one column
//! - **Engine** ([`ScrubEngine`]): folds a request list over a copy of a table
//!
//! The codec reaches its collaborators through the [`SymmetricCipher`],
//! [`SyntheticGenerator`] and [`Redactor`] traits.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tabscrub::anonymization::{ScrubEngine, TransformRequest};
//!
//! let engine = ScrubEngine::new(&table)?;
//! let outcome = engine.apply_all(&table, &[
//!     TransformRequest::encrypt("ssn"),
//!     TransformRequest::synthesize("email", "email"),
//!     TransformRequest::truncate("zip", 2, true),
//!     TransformRequest::redact("notes"),
//! ])?;
//! println!("{}", outcome.report.format_console());
//! ```

pub mod cipher;
pub mod codec;
pub mod column;
pub mod engine;
pub mod mapper;
pub mod models;
pub mod redactor;
pub mod registry;
pub mod report;
pub mod request;
pub mod synth;

// Re-export main types
pub use cipher::{AesGcmCipher, CipherKey, SymmetricCipher};
pub use codec::ValueCodec;
pub use column::{ColumnTransform, ColumnTransformer};
pub use engine::{BatchOutcome, ScrubEngine};
pub use mapper::{UniqueValueMapper, ValueMapping};
pub use models::RedactionCategory;
pub use redactor::{PatternRegistry, Redactor, RegexRedactor};
pub use registry::TypeRegistry;
pub use report::BatchReport;
pub use request::{TransformKind, TransformOp, TransformRequest};
pub use synth::{FakerGenerator, SynthCategory, SyntheticGenerator};
