//! Cipher key material

use crate::domain::{Result, ScrubError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;
use zeroize::Zeroizing;

/// Symmetric key that reverses an encrypt transform
///
/// The key bytes are zeroed when the key is dropped. `Debug` output shows a
/// short SHA-256 fingerprint instead of the key, so a key can be identified in
/// logs without being revealed.
#[derive(Clone)]
pub struct CipherKey(Zeroizing<Vec<u8>>);

impl CipherKey {
    /// Key length in bytes (AES-256)
    pub const LEN: usize = 32;

    /// Create a key from raw bytes
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Validation`] unless `bytes` is exactly [`Self::LEN`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::LEN {
            return Err(ScrubError::Validation(format!(
                "Invalid key length: expected {} bytes, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        Ok(Self(Zeroizing::new(bytes.to_vec())))
    }

    /// Create a key from standard base64 text
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|e| ScrubError::Validation(format!("Invalid base64 key: {e}")))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Encode the key as standard base64 text
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.as_bytes())
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// First 16 hex characters of the SHA-256 digest of the key
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        let hex = format!("{digest:x}");
        hex[..16].to_string()
    }

    /// Write the raw key bytes to `path`, creating parent directories
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ScrubError::Io(format!(
                    "Failed to create key directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        fs::write(path, self.as_bytes()).map_err(|e| {
            ScrubError::Io(format!("Failed to write key file {}: {e}", path.display()))
        })?;

        tracing::info!(path = %path.display(), fingerprint = %self.fingerprint(), "Cipher key exported");
        Ok(())
    }

    /// Read raw key bytes previously written by [`export_to`](Self::export_to)
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = Zeroizing::new(fs::read(path).map_err(|e| {
            ScrubError::Io(format!("Failed to read key file {}: {e}", path.display()))
        })?);
        let key = Self::from_bytes(&bytes)?;

        tracing::debug!(path = %path.display(), fingerprint = %key.fingerprint(), "Cipher key loaded");
        Ok(key)
    }
}

impl PartialEq for CipherKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for CipherKey {}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherKey({})", self.fingerprint())
    }
}
