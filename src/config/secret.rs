//! Secret configuration values
//!
//! Base64 keys read from the job file are wrapped in `secrecy::Secret`: the
//! memory is zeroed on drop and `Debug` output is redacted. Access requires an
//! explicit `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use tabscrub::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("q83vEjRWeJA=".to_string());
//! assert_eq!(key.expose_secret().as_ref(), "q83vEjRWeJA=");
//! assert!(!format!("{key:?}").contains("q83v"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Zeroizing string that can live inside a `Secret`
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A secret string from configuration
pub type SecretString = Secret<SecretValue>;

/// Wrap a string as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("c2VjcmV0LWtleQ==".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("c2VjcmV0LWtleQ=="));
    }

    #[test]
    fn test_secret_from_toml() {
        #[derive(Deserialize)]
        struct KeySection {
            value: SecretString,
        }

        let section: KeySection = toml::from_str(r#"value = "AAAA""#).unwrap();
        assert_eq!(section.value.expose_secret().as_ref(), "AAAA");
    }

    #[test]
    fn test_blank_secret_is_empty() {
        assert!(secret_string("  ".to_string()).expose_secret().is_empty());
    }
}
