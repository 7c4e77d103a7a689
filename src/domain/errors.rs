//! Domain error types
//!
//! This module defines the error hierarchy for tabscrub. All errors are
//! domain-specific and don't expose third-party types.
//!
//! Errors split into two groups:
//! - **Request errors** ([`ScrubError::is_request_error`]) describe a malformed
//!   transform request: unknown kind, missing parameter, missing column or an
//!   unknown synthesize category. A batch records them and moves on to the next
//!   request.
//! - **Data errors** (decryption, type, ...) are surfaced to the caller. A key
//!   mismatch is never mapped to a default value.

use thiserror::Error;

/// Main tabscrub error type
#[derive(Debug, Error)]
pub enum ScrubError {
    /// The requested transform kind is not one of the supported kinds
    #[error("Unknown transform kind '{0}'. Must be one of: encrypt, decrypt, synthesize, truncate, redact")]
    UnknownTransformKind(String),

    /// A parameter required by the requested transform kind is absent
    #[error("Missing parameter '{parameter}' for {kind} transform on column '{column}'")]
    MissingParameter {
        /// Column named by the request
        column: String,
        /// Transform kind that requires the parameter
        kind: String,
        /// Name of the absent parameter
        parameter: &'static str,
    },

    /// Ciphertext could not be decrypted with the supplied key
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Synthesize category is not registered with the generator
    #[error("Unknown synthesize category '{0}'")]
    UnknownCategory(String),

    /// Value has the wrong type for the operation, or cannot be cast
    #[error("Type error: {0}")]
    Type(String),

    /// Column is not present in the table
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors (malformed tables, invalid keys, bad input cells)
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),
}

impl ScrubError {
    /// Creates a missing parameter error
    pub fn missing_parameter(
        column: impl Into<String>,
        kind: impl Into<String>,
        parameter: &'static str,
    ) -> Self {
        Self::MissingParameter {
            column: column.into(),
            kind: kind.into(),
            parameter,
        }
    }

    /// Whether this error describes a malformed request rather than bad data
    ///
    /// Batch application skips requests failing with one of these errors and
    /// continues with the rest of the batch.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTransformKind(_)
                | Self::MissingParameter { .. }
                | Self::ColumnNotFound(_)
                | Self::UnknownCategory(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ScrubError {
    fn from(err: std::io::Error) -> Self {
        ScrubError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ScrubError {
    fn from(err: serde_json::Error) -> Self {
        ScrubError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ScrubError {
    fn from(err: toml::de::Error) -> Self {
        ScrubError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors
impl From<csv::Error> for ScrubError {
    fn from(err: csv::Error) -> Self {
        ScrubError::Csv(err.to_string())
    }
}
