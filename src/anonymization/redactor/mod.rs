//! Pattern-based redaction
//!
//! Provides the [`Redactor`] trait and a regex implementation driven by a TOML
//! pattern library.

pub mod patterns;
pub mod regex;

pub use self::regex::RegexRedactor;
pub use patterns::PatternRegistry;

/// Trait for redaction implementations
pub trait Redactor: Send + Sync {
    /// Replace recognised PII spans in `text` with `{{CATEGORY}}` placeholders
    ///
    /// Must be deterministic: identical input yields identical output.
    fn redact(&self, text: &str) -> String;
}
