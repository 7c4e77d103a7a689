//! Cell values and declared column types
//!
//! [`Value`] is the unit the engine transforms. Every value has a canonical
//! string form (its [`Display`](std::fmt::Display) output) which is what gets
//! encrypted, truncated and redacted. [`ColumnType::cast`] is the inverse for
//! each declared type, so `ty.cast(&v.to_string())` reproduces `v` for every
//! valid instance `v` of `ty`.

use crate::domain::{Result, ScrubError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Declared element type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// UTF-8 text
    #[default]
    String,
    /// 64-bit signed integers
    Integer,
    /// 64-bit floats
    Float,
    /// Calendar dates (`YYYY-MM-DD`)
    Date,
    /// Date and time without timezone
    DateTime,
    /// Raw bytes (ciphertext)
    Bytes,
    /// Untyped values, kept as text
    Opaque,
}

impl ColumnType {
    /// All column types, in declaration order
    pub const ALL: [ColumnType; 7] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Date,
        Self::DateTime,
        Self::Bytes,
        Self::Opaque,
    ];

    /// Lowercase name used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Bytes => "bytes",
            Self::Opaque => "opaque",
        }
    }

    /// Whether values of this type are dates or date-times
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    /// Whether string results are returned as text rather than parsed
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::String | Self::Opaque)
    }

    /// Cast a canonical string back to a value of this type
    ///
    /// The empty string casts to [`Value::Null`] for every non-text type.
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Type`] if `text` is not a valid literal of this type.
    pub fn cast(&self, text: &str) -> Result<Value> {
        if text.is_empty() && !self.is_textual() && *self != Self::Bytes {
            return Ok(Value::Null);
        }

        match self {
            Self::String | Self::Opaque => Ok(Value::Str(text.to_string())),
            Self::Integer => text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| self.cast_error(text, e)),
            Self::Float => text
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| self.cast_error(text, e)),
            Self::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(Value::Date)
                .map_err(|e| self.cast_error(text, e)),
            Self::DateTime => DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(Value::DateTime)
                .ok_or_else(|| self.cast_error(text, "unrecognised date-time format")),
            Self::Bytes => STANDARD
                .decode(text)
                .map(Value::Bytes)
                .map_err(|e| self.cast_error(text, e)),
        }
    }

    fn cast_error(&self, text: &str, err: impl fmt::Display) -> ScrubError {
        ScrubError::Type(format!(
            "cannot cast {} characters to {}: {err}",
            text.chars().count(),
            self.name()
        ))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = ScrubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "string" | "str" | "text" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "float" | "double" => Ok(Self::Float),
            "date" => Ok(Self::Date),
            "datetime" | "date_time" | "timestamp" => Ok(Self::DateTime),
            "bytes" => Ok(Self::Bytes),
            "opaque" | "object" => Ok(Self::Opaque),
            _ => Err(ScrubError::Configuration(format!(
                "Invalid column type '{s}'. Must be one of: string, integer, float, date, datetime, bytes, opaque"
            ))),
        }
    }
}

/// A single cell value
#[derive(Debug, Clone)]
pub enum Value {
    /// Missing value
    Null,
    /// Text
    Str(String),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time
    DateTime(NaiveDateTime),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl Value {
    /// Type of this value, `None` for [`Value::Null`]
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Self::Null => None,
            Self::Str(_) => Some(ColumnType::String),
            Self::Int(_) => Some(ColumnType::Integer),
            Self::Float(_) => Some(ColumnType::Float),
            Self::Date(_) => Some(ColumnType::Date),
            Self::DateTime(_) => Some(ColumnType::DateTime),
            Self::Bytes(_) => Some(ColumnType::Bytes),
        }
    }

    /// Whether this value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text form for pattern matching
    ///
    /// Missing values and raw bytes have no text form.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null | Self::Bytes(_) => None,
            Self::Str(s) => Some(Cow::Borrowed(s)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Bytes(b) => f.write_str(&STANDARD.encode(b)),
        }
    }
}

// Floats compare by bit pattern so that values can key a hash map. Every NaN
// prints as "NaN", so all NaN payloads share one key.
fn float_bits(x: f64) -> u64 {
    if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => float_bits(*a) == float_bits(*b),
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Str(s) => s.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(x) => float_bits(*x).hash(state),
            Self::Date(d) => d.hash(state),
            Self::DateTime(dt) => dt.hash(state),
            Self::Bytes(b) => b.hash(state),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}
