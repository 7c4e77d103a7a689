//! Transform requests
//!
//! A [`TransformRequest`] is what a caller asks for: a column, a kind name, and
//! whatever parameters came with it. Nothing is checked at construction time.
//! [`TransformRequest::validate`] turns it into a [`TransformOp`], a closed
//! enum carrying exactly the parameters its kind needs, or fails with a request
//! error.

use crate::anonymization::cipher::CipherKey;
use crate::anonymization::synth::SynthCategory;
use crate::domain::{ColumnType, Result, ScrubError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of column transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// Reversible encryption with the engine key
    Encrypt,
    /// Reverse of [`TransformKind::Encrypt`]
    Decrypt,
    /// Substitute synthetic values
    Synthesize,
    /// Drop characters from one end
    Truncate,
    /// Replace recognised PII spans with placeholders
    Redact,
}

impl TransformKind {
    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
            Self::Synthesize => "synthesize",
            Self::Truncate => "truncate",
            Self::Redact => "redact",
        }
    }

    /// Whether the transformation can be undone with a key
    pub fn is_reversible(&self) -> bool {
        matches!(self, Self::Encrypt | Self::Decrypt)
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = ScrubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "encrypt" => Ok(Self::Encrypt),
            "decrypt" => Ok(Self::Decrypt),
            "synthesize" | "synthesise" | "faker" | "fake" => Ok(Self::Synthesize),
            "truncate" => Ok(Self::Truncate),
            "redact" | "scrub" => Ok(Self::Redact),
            _ => Err(ScrubError::UnknownTransformKind(s.to_string())),
        }
    }
}

/// A request to transform one column
#[derive(Debug, Clone)]
pub struct TransformRequest {
    /// Column to transform
    pub column: String,
    /// Transform kind name, parsed at execution time
    pub kind: String,
    /// Synthesize: generator category name
    pub category: Option<String>,
    /// Truncate: number of characters to remove
    pub count: Option<usize>,
    /// Truncate: remove from the end (`true`) or from the start (`false`)
    pub from_end: bool,
    /// Decrypt: key the column was encrypted with
    pub key: Option<CipherKey>,
    /// Decrypt: type to cast decrypted strings to
    pub target_type: Option<ColumnType>,
}

impl TransformRequest {
    /// Create a request with no kind-specific parameters
    pub fn new(column: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: kind.into(),
            category: None,
            count: None,
            from_end: true,
            key: None,
            target_type: None,
        }
    }

    /// Encrypt `column` with the engine key
    pub fn encrypt(column: impl Into<String>) -> Self {
        Self::new(column, TransformKind::Encrypt.name())
    }

    /// Decrypt `column` with `key`
    pub fn decrypt(column: impl Into<String>, key: CipherKey) -> Self {
        Self::new(column, TransformKind::Decrypt.name()).with_key(key)
    }

    /// Replace `column` with synthetic values of `category`
    pub fn synthesize(column: impl Into<String>, category: impl Into<String>) -> Self {
        Self::new(column, TransformKind::Synthesize.name()).with_category(category)
    }

    /// Remove `count` characters from one end of every value in `column`
    pub fn truncate(column: impl Into<String>, count: usize, from_end: bool) -> Self {
        Self::new(column, TransformKind::Truncate.name()).with_truncation(count, from_end)
    }

    /// Redact PII spans in `column`
    pub fn redact(column: impl Into<String>) -> Self {
        Self::new(column, TransformKind::Redact.name())
    }

    /// Set the synthesize category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the truncation count and direction
    pub fn with_truncation(mut self, count: usize, from_end: bool) -> Self {
        self.count = Some(count);
        self.from_end = from_end;
        self
    }

    /// Set the decryption key
    pub fn with_key(mut self, key: CipherKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Set the decryption target type
    pub fn with_target_type(mut self, target_type: ColumnType) -> Self {
        self.target_type = Some(target_type);
        self
    }

    /// Check the kind and its parameters
    ///
    /// # Errors
    ///
    /// - [`ScrubError::UnknownTransformKind`] if the kind name is not recognised
    /// - [`ScrubError::MissingParameter`] if a required parameter is absent
    /// - [`ScrubError::UnknownCategory`] if the synthesize category is not in the catalog
    pub fn validate(&self) -> Result<TransformOp> {
        let kind: TransformKind = self.kind.parse()?;
        let missing = |parameter| ScrubError::missing_parameter(&self.column, kind.name(), parameter);

        match kind {
            TransformKind::Encrypt => Ok(TransformOp::Encrypt),
            TransformKind::Decrypt => {
                let key = self.key.clone().ok_or_else(|| missing("key"))?;
                Ok(TransformOp::Decrypt {
                    key,
                    target_type: self.target_type,
                })
            }
            TransformKind::Synthesize => {
                let category = self
                    .category
                    .as_deref()
                    .ok_or_else(|| missing("category"))?
                    .parse()?;
                Ok(TransformOp::Synthesize { category })
            }
            TransformKind::Truncate => {
                let count = self.count.ok_or_else(|| missing("count"))?;
                Ok(TransformOp::Truncate {
                    count,
                    from_end: self.from_end,
                })
            }
            TransformKind::Redact => Ok(TransformOp::Redact),
        }
    }
}

/// A validated transformation with its parameters
#[derive(Debug, Clone)]
pub enum TransformOp {
    /// Encrypt with the engine key
    Encrypt,
    /// Decrypt with `key`, casting to `target_type` when given
    Decrypt {
        /// Key the column was encrypted with
        key: CipherKey,
        /// Explicit cast target; falls back to the type registry
        target_type: Option<ColumnType>,
    },
    /// Replace with synthetic values
    Synthesize {
        /// Generator category
        category: SynthCategory,
    },
    /// Drop characters from one end
    Truncate {
        /// Characters to remove
        count: usize,
        /// Remove from the end rather than the start
        from_end: bool,
    },
    /// Replace PII spans with placeholders
    Redact,
}

impl TransformOp {
    /// Kind of this operation
    pub fn kind(&self) -> TransformKind {
        match self {
            Self::Encrypt => TransformKind::Encrypt,
            Self::Decrypt { .. } => TransformKind::Decrypt,
            Self::Synthesize { .. } => TransformKind::Synthesize,
            Self::Truncate { .. } => TransformKind::Truncate,
            Self::Redact => TransformKind::Redact,
        }
    }
}
