//! Synthetic values from the `fake` crate

use super::{SynthCategory, SyntheticGenerator};
use crate::domain::Value;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName, ZipCode};
use fake::faker::chrono::en::DateTime;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{SafeEmail, Username, IPv4};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Generator backed by `fake` providers
///
/// Seeded generators produce the same sequence of values for the same
/// sequence of requests.
pub struct FakerGenerator {
    rng: Mutex<StdRng>,
}

impl FakerGenerator {
    /// Create a generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn ssn(rng: &mut StdRng) -> String {
        // Area 000, 666 and 9xx are never issued
        let mut area: u16 = rng.gen_range(1..900);
        if area == 666 {
            area = 665;
        }
        format!(
            "{:03}-{:02}-{:04}",
            area,
            rng.gen_range(1..100u16),
            rng.gen_range(1..10000u16)
        )
    }
}

impl Default for FakerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticGenerator for FakerGenerator {
    fn generate(&self, category: SynthCategory) -> Value {
        let mut guard = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let rng: &mut StdRng = &mut guard;

        match category {
            SynthCategory::Name => Value::Str(Name().fake_with_rng(rng)),
            SynthCategory::FirstName => Value::Str(FirstName().fake_with_rng(rng)),
            SynthCategory::LastName => Value::Str(LastName().fake_with_rng(rng)),
            SynthCategory::Email => Value::Str(SafeEmail().fake_with_rng(rng)),
            SynthCategory::PhoneNumber => Value::Str(PhoneNumber().fake_with_rng(rng)),
            SynthCategory::Ssn => Value::Str(Self::ssn(rng)),
            SynthCategory::Zipcode => Value::Str(ZipCode().fake_with_rng(rng)),
            SynthCategory::City => Value::Str(CityName().fake_with_rng(rng)),
            SynthCategory::StreetAddress => {
                let number: String = BuildingNumber().fake_with_rng(rng);
                let street: String = StreetName().fake_with_rng(rng);
                Value::Str(format!("{number} {street}"))
            }
            SynthCategory::Company => Value::Str(CompanyName().fake_with_rng(rng)),
            SynthCategory::Ipv4 => Value::Str(IPv4().fake_with_rng(rng)),
            SynthCategory::UserName => Value::Str(Username().fake_with_rng(rng)),
            SynthCategory::Date => {
                let ts: chrono::DateTime<chrono::Utc> = DateTime().fake_with_rng(rng);
                Value::Date(ts.date_naive())
            }
            SynthCategory::DateTime => {
                let ts: chrono::DateTime<chrono::Utc> = DateTime().fake_with_rng(rng);
                Value::DateTime(ts.naive_utc())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_every_category_matches_output_type() {
        let generator = FakerGenerator::new();
        for category in SynthCategory::all() {
            let value = generator.generate(*category);
            assert_eq!(value.column_type(), Some(category.output_type()), "{category}");
        }
    }

    #[test]
    fn test_ssn_format() {
        let generator = FakerGenerator::seeded(11);
        let ssn_re = Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap();
        for _ in 0..50 {
            let value = generator.generate(SynthCategory::Ssn).to_string();
            assert!(ssn_re.is_match(&value), "{value}");
            assert!(!value.starts_with("000") && !value.starts_with("666"));
        }
    }

    #[test]
    fn test_email_contains_at() {
        let generator = FakerGenerator::new();
        let value = generator.generate(SynthCategory::Email).to_string();
        assert!(value.contains('@'));
    }

    #[test]
    fn test_seeded_generators_agree() {
        let a = FakerGenerator::seeded(42);
        let b = FakerGenerator::seeded(42);
        for category in SynthCategory::all() {
            assert_eq!(a.generate(*category), b.generate(*category));
        }
    }
}
