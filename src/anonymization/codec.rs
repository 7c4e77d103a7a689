//! Single-value transformations
//!
//! [`ValueCodec`] knows nothing about columns or tables. Each method maps one
//! input value to its replacement; [`UniqueValueMapper`](super::mapper::UniqueValueMapper)
//! calls it once per distinct value.

use crate::anonymization::cipher::{AesGcmCipher, CipherKey, SymmetricCipher};
use crate::anonymization::redactor::{Redactor, RegexRedactor};
use crate::anonymization::synth::{FakerGenerator, SynthCategory, SyntheticGenerator};
use crate::domain::{ColumnType, Result, ScrubError, Value};
use std::fmt;
use std::sync::Arc;

/// Per-kind value transformations bound to one key and one set of collaborators
#[derive(Clone)]
pub struct ValueCodec {
    cipher: Arc<dyn SymmetricCipher>,
    key: CipherKey,
    generator: Arc<dyn SyntheticGenerator>,
    redactor: Arc<dyn Redactor>,
}

impl ValueCodec {
    /// Create a codec with the default collaborators
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in redaction patterns fail to load.
    pub fn new(key: CipherKey) -> Result<Self> {
        Ok(Self {
            cipher: Arc::new(AesGcmCipher::new()),
            key,
            generator: Arc::new(FakerGenerator::new()),
            redactor: Arc::new(RegexRedactor::new()?),
        })
    }

    /// Replace the cipher
    pub fn with_cipher(mut self, cipher: Arc<dyn SymmetricCipher>) -> Self {
        self.cipher = cipher;
        self
    }

    /// Replace the synthetic value generator
    pub fn with_generator(mut self, generator: Arc<dyn SyntheticGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the redactor
    pub fn with_redactor(mut self, redactor: Arc<dyn Redactor>) -> Self {
        self.redactor = redactor;
        self
    }

    /// Key used by [`ValueCodec::encrypt`]
    pub fn key(&self) -> &CipherKey {
        &self.key
    }

    /// Encrypt the canonical string form of `value` with the codec key
    pub fn encrypt(&self, value: &Value) -> Result<Value> {
        let plaintext = value.to_string();
        let ciphertext = self.cipher.encrypt(plaintext.as_bytes(), &self.key)?;
        Ok(Value::Bytes(ciphertext))
    }

    /// Decrypt `value` with `key` and cast the plaintext to `expected`
    ///
    /// Without an expected type the plaintext is returned as a string.
    ///
    /// # Errors
    ///
    /// - [`ScrubError::Type`] if `value` is not bytes, or the plaintext is not a
    ///   valid literal of `expected`
    /// - [`ScrubError::Decryption`] if the key does not match or the ciphertext
    ///   is malformed
    pub fn decrypt(
        &self,
        value: &Value,
        expected: Option<ColumnType>,
        key: &CipherKey,
    ) -> Result<Value> {
        let Value::Bytes(ciphertext) = value else {
            return Err(ScrubError::Type(format!(
                "decrypt expects bytes, found {}",
                value.column_type().map_or("null", |t| t.name())
            )));
        };

        let plaintext = self.cipher.decrypt(ciphertext, key)?;
        let text = String::from_utf8(plaintext).map_err(|_| {
            ScrubError::Decryption("decrypted plaintext is not valid UTF-8".to_string())
        })?;

        match expected {
            Some(ty) => ty.cast(&text),
            None => Ok(Value::Str(text)),
        }
    }

    /// Generate a synthetic value; the input value is ignored
    pub fn synthesize(&self, category: SynthCategory) -> Value {
        self.generator.generate(category)
    }

    /// Drop `count` characters from one end of the canonical string form
    ///
    /// `from_end = true` keeps the leading characters. The result is cast back
    /// to `declared` unless that type is textual or temporal, in which case the
    /// truncated text is returned. A result that no longer casts becomes
    /// [`Value::Null`].
    pub fn truncate(value: &Value, declared: ColumnType, count: usize, from_end: bool) -> Value {
        if value.is_null() {
            return Value::Null;
        }

        let text = value.to_string();
        let len = text.chars().count();
        if count > len {
            tracing::warn!(
                count,
                length = len,
                "Truncation count exceeds value length, result is empty"
            );
        }

        let keep = len.saturating_sub(count);
        let truncated: String = if from_end {
            text.chars().take(keep).collect()
        } else {
            text.chars().skip(count).collect()
        };

        if declared.is_textual() || declared.is_temporal() {
            return Value::Str(truncated);
        }

        match declared.cast(&truncated) {
            Ok(cast) => cast,
            Err(e) => {
                tracing::debug!(dtype = %declared, error = %e, "Truncated value no longer casts");
                Value::Null
            }
        }
    }

    /// Redact PII spans in the text form of `value`
    ///
    /// Missing values and raw bytes have no text form and pass through.
    pub fn redact(&self, value: &Value) -> Value {
        match value.as_text() {
            Some(text) => Value::Str(self.redactor.redact(&text)),
            None => value.clone(),
        }
    }
}

impl fmt::Debug for ValueCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCodec")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use test_case::test_case;

    fn codec() -> ValueCodec {
        let key = AesGcmCipher::new().generate_key().unwrap();
        ValueCodec::new(key)
            .unwrap()
            .with_generator(Arc::new(FakerGenerator::seeded(7)))
    }

    #[test]
    fn test_encrypt_yields_bytes() {
        let codec = codec();
        assert!(matches!(codec.encrypt(&Value::Int(5)).unwrap(), Value::Bytes(_)));
        assert!(matches!(codec.encrypt(&Value::Null).unwrap(), Value::Bytes(_)));
    }

    #[test_case(Value::Int(123456789), ColumnType::Integer ; "integer")]
    #[test_case(Value::Float(-0.125), ColumnType::Float ; "float")]
    #[test_case(Value::Float(-0.0), ColumnType::Float ; "negative zero")]
    #[test_case(Value::Float(f64::from_bits(0xfff8_0000_0000_0000)), ColumnType::Float ; "negative nan")]
    #[test_case(Value::from("Jane Doe"), ColumnType::String ; "string")]
    #[test_case(Value::Date(NaiveDate::from_ymd_opt(1990, 12, 31).unwrap()), ColumnType::Date ; "date")]
    #[test_case(Value::Null, ColumnType::Integer ; "null integer")]
    fn test_round_trip(value: Value, ty: ColumnType) {
        let codec = codec();
        let encrypted = codec.encrypt(&value).unwrap();
        let decrypted = codec.decrypt(&encrypted, Some(ty), codec.key()).unwrap();
        assert_eq!(decrypted, value);
    }

    #[test]
    fn test_decrypt_without_type_returns_string() {
        let codec = codec();
        let encrypted = codec.encrypt(&Value::Int(42)).unwrap();
        let decrypted = codec.decrypt(&encrypted, None, codec.key()).unwrap();
        assert_eq!(decrypted, Value::from("42"));
    }

    #[test]
    fn test_decrypt_non_bytes_is_type_error() {
        let codec = codec();
        let err = codec
            .decrypt(&Value::from("plain"), None, codec.key())
            .unwrap_err();
        assert!(matches!(err, ScrubError::Type(_)));
    }

    #[test]
    fn test_decrypt_wrong_key_is_decryption_error() {
        let codec = codec();
        let other = AesGcmCipher::new().generate_key().unwrap();
        let encrypted = codec.encrypt(&Value::from("secret")).unwrap();
        let err = codec.decrypt(&encrypted, None, &other).unwrap_err();
        assert!(matches!(err, ScrubError::Decryption(_)));
    }

    #[test]
    fn test_decrypt_bad_literal_is_type_error() {
        let codec = codec();
        let encrypted = codec.encrypt(&Value::from("not a number")).unwrap();
        let err = codec
            .decrypt(&encrypted, Some(ColumnType::Integer), codec.key())
            .unwrap_err();
        assert!(matches!(err, ScrubError::Type(_)));
    }

    #[test_case("123456789", 5, true, "1234" ; "from end")]
    #[test_case("123456789", 5, false, "6789" ; "from start")]
    #[test_case("123456789", 0, true, "123456789" ; "zero count")]
    #[test_case("123456789", 9, true, "" ; "exact length")]
    #[test_case("123", 10, false, "" ; "overflow")]
    #[test_case("Zoë", 1, true, "Zo" ; "multibyte")]
    fn test_truncate_text(input: &str, count: usize, from_end: bool, expected: &str) {
        let out = ValueCodec::truncate(&Value::from(input), ColumnType::String, count, from_end);
        assert_eq!(out, Value::from(expected));
    }

    #[test]
    fn test_truncate_casts_back_to_integer() {
        let out = ValueCodec::truncate(&Value::Int(94110), ColumnType::Integer, 2, true);
        assert_eq!(out, Value::Int(941));
    }

    #[test]
    fn test_truncate_overflow_on_integer_is_null() {
        let out = ValueCodec::truncate(&Value::Int(12), ColumnType::Integer, 5, true);
        assert_eq!(out, Value::Null);
    }

    #[test]
    fn test_truncate_failed_cast_is_null() {
        // "1.5" loses its last character and "1." is not an integer
        let out = ValueCodec::truncate(&Value::Float(1.5), ColumnType::Integer, 1, true);
        assert_eq!(out, Value::Null);
    }

    #[test]
    fn test_truncate_temporal_returns_text() {
        let date = Value::Date(NaiveDate::from_ymd_opt(2021, 3, 14).unwrap());
        let out = ValueCodec::truncate(&date, ColumnType::Date, 3, true);
        assert_eq!(out, Value::from("2021-03"));
    }

    #[test]
    fn test_truncate_null_passes_through() {
        let out = ValueCodec::truncate(&Value::Null, ColumnType::String, 2, true);
        assert_eq!(out, Value::Null);
    }

    #[test]
    fn test_redact_replaces_pii() {
        let codec = codec();
        let out = codec.redact(&Value::from("SSN 123-45-6789"));
        assert_eq!(out, Value::from("SSN {{SSN}}"));
    }

    #[test]
    fn test_redact_non_text_passes_through() {
        let codec = codec();
        assert_eq!(codec.redact(&Value::Null), Value::Null);
        assert_eq!(codec.redact(&Value::Bytes(vec![1, 2])), Value::Bytes(vec![1, 2]));
    }

    #[test]
    fn test_synthesize_uses_category_type() {
        let codec = codec();
        assert!(matches!(codec.synthesize(SynthCategory::Date), Value::Date(_)));
        assert!(matches!(codec.synthesize(SynthCategory::Email), Value::Str(_)));
    }
}
