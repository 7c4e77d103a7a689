//! Redaction data models

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Category of recognised PII span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedactionCategory {
    /// Person names (honorific followed by a capitalised name)
    Name,
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// Social Security Numbers
    Ssn,
    /// Web URLs
    Url,
    /// IPv4 addresses
    IpAddress,
    /// Payment card numbers
    CreditCard,
    /// Twitter/X handles
    Twitter,
}

impl RedactionCategory {
    /// All categories
    pub fn all() -> &'static [RedactionCategory] {
        &[
            Self::Name,
            Self::Email,
            Self::Phone,
            Self::Ssn,
            Self::Url,
            Self::IpAddress,
            Self::CreditCard,
            Self::Twitter,
        ]
    }

    /// Upper-case label used inside placeholder tokens
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Ssn => "SSN",
            Self::Url => "URL",
            Self::IpAddress => "IP_ADDRESS",
            Self::CreditCard => "CREDIT_CARD",
            Self::Twitter => "TWITTER",
        }
    }

    /// Placeholder token substituted for a span of this category, e.g. `{{EMAIL}}`
    pub fn placeholder(&self) -> String {
        format!("{{{{{}}}}}", self.label())
    }
}

impl FromStr for RedactionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NAME" | "PERSON" => Ok(Self::Name),
            "EMAIL" => Ok(Self::Email),
            "PHONE" => Ok(Self::Phone),
            "SSN" => Ok(Self::Ssn),
            "URL" => Ok(Self::Url),
            "IP_ADDRESS" | "IP" => Ok(Self::IpAddress),
            "CREDIT_CARD" | "CARD" => Ok(Self::CreditCard),
            "TWITTER" => Ok(Self::Twitter),
            _ => Err(format!("Unknown redaction category: {s}")),
        }
    }
}

/// A recognised PII span within a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSpan {
    /// Category of the span
    pub category: RedactionCategory,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl RedactionSpan {
    /// Create a new span
    pub fn new(category: RedactionCategory, start: usize, end: usize) -> Self {
        Self {
            category,
            start,
            end,
        }
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &RedactionSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        assert_eq!(RedactionCategory::Ssn.placeholder(), "{{SSN}}");
        assert_eq!(RedactionCategory::IpAddress.placeholder(), "{{IP_ADDRESS}}");
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("person".parse::<RedactionCategory>(), Ok(RedactionCategory::Name));
        assert!("fax".parse::<RedactionCategory>().is_err());
    }

    #[test]
    fn test_overlap() {
        let a = RedactionSpan::new(RedactionCategory::Phone, 0, 5);
        let b = RedactionSpan::new(RedactionCategory::Ssn, 4, 8);
        let c = RedactionSpan::new(RedactionCategory::Ssn, 5, 8);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
