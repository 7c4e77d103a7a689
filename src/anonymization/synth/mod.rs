//! Synthetic value generation
//!
//! Categories form a closed set: a request naming a category outside
//! [`SynthCategory::all`] fails with
//! [`ScrubError::UnknownCategory`](crate::domain::ScrubError::UnknownCategory)
//! before any value is generated.

pub mod faker;

pub use faker::FakerGenerator;

use crate::domain::{ColumnType, ScrubError, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for synthetic value generators
pub trait SyntheticGenerator: Send + Sync {
    /// Generate one synthetic value of the given category
    fn generate(&self, category: SynthCategory) -> Value;
}

/// Category of synthetic value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthCategory {
    /// Full person name
    Name,
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// Email address on a safe (example) domain
    Email,
    /// Phone number
    PhoneNumber,
    /// US social security number, `AAA-GG-SSSS`
    Ssn,
    /// US ZIP code
    Zipcode,
    /// City name
    City,
    /// Building number and street
    StreetAddress,
    /// Company name
    Company,
    /// IPv4 address
    Ipv4,
    /// Login name
    UserName,
    /// Calendar date
    Date,
    /// Date and time
    DateTime,
}

impl SynthCategory {
    /// The category catalog
    pub fn all() -> &'static [SynthCategory] {
        &[
            Self::Name,
            Self::FirstName,
            Self::LastName,
            Self::Email,
            Self::PhoneNumber,
            Self::Ssn,
            Self::Zipcode,
            Self::City,
            Self::StreetAddress,
            Self::Company,
            Self::Ipv4,
            Self::UserName,
            Self::Date,
            Self::DateTime,
        ]
    }

    /// Catalog name of the category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Ssn => "ssn",
            Self::Zipcode => "zipcode",
            Self::City => "city",
            Self::StreetAddress => "street_address",
            Self::Company => "company",
            Self::Ipv4 => "ipv4",
            Self::UserName => "user_name",
            Self::Date => "date",
            Self::DateTime => "date_time",
        }
    }

    /// Type of the values generated for this category
    pub fn output_type(&self) -> ColumnType {
        match self {
            Self::Date => ColumnType::Date,
            Self::DateTime => ColumnType::DateTime,
            _ => ColumnType::String,
        }
    }
}

impl fmt::Display for SynthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SynthCategory {
    type Err = ScrubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "phone" => return Ok(Self::PhoneNumber),
            "zip" | "postcode" => return Ok(Self::Zipcode),
            "address" => return Ok(Self::StreetAddress),
            "username" => return Ok(Self::UserName),
            "datetime" => return Ok(Self::DateTime),
            _ => {}
        }

        Self::all()
            .iter()
            .copied()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| ScrubError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_parse_back() {
        for category in SynthCategory::all() {
            assert_eq!(category.name().parse::<SynthCategory>().unwrap(), *category);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("phone".parse::<SynthCategory>().unwrap(), SynthCategory::PhoneNumber);
        assert_eq!("ZIP".parse::<SynthCategory>().unwrap(), SynthCategory::Zipcode);
    }

    #[test]
    fn test_unknown_category() {
        let err = "favourite_colour".parse::<SynthCategory>().unwrap_err();
        assert!(matches!(err, ScrubError::UnknownCategory(ref c) if c == "favourite_colour"));
    }

    #[test]
    fn test_output_types() {
        assert_eq!(SynthCategory::Date.output_type(), ColumnType::Date);
        assert_eq!(SynthCategory::Email.output_type(), ColumnType::String);
    }
}
