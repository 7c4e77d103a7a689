//! AES-256-GCM cipher
//!
//! Ciphertext layout: `nonce (12 bytes) || encrypted payload || tag (16 bytes)`.
//! A fresh random nonce is drawn for every call, so encrypting the same
//! plaintext twice yields different ciphertexts.

use super::{CipherKey, SymmetricCipher};
use crate::domain::{Result, ScrubError};
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use zeroize::Zeroizing;

/// AES-GCM nonce size: 96 bits
const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size: 128 bits
const TAG_SIZE: usize = 16;

/// AES-256-GCM implementation of [`SymmetricCipher`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcmCipher;

impl AesGcmCipher {
    /// Create a new cipher
    pub fn new() -> Self {
        Self
    }

    fn cipher(key: &CipherKey) -> Result<Aes256Gcm> {
        Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| ScrubError::Validation(format!("Invalid AES-256 key: {e}")))
    }
}

impl SymmetricCipher for AesGcmCipher {
    fn generate_key(&self) -> Result<CipherKey> {
        let key = Zeroizing::new(Aes256Gcm::generate_key(&mut OsRng).to_vec());
        CipherKey::from_bytes(&key)
    }

    fn encrypt(&self, plaintext: &[u8], key: &CipherKey) -> Result<Vec<u8>> {
        let cipher = Self::cipher(key)?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let sealed = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| ScrubError::Validation(format!("Encryption failed: {e}")))?;

        let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], key: &CipherKey) -> Result<Vec<u8>> {
        if ciphertext.len() < NONCE_SIZE + TAG_SIZE {
            return Err(ScrubError::Decryption(format!(
                "ciphertext is {} bytes, shorter than the {} byte minimum",
                ciphertext.len(),
                NONCE_SIZE + TAG_SIZE
            )));
        }

        let cipher = Self::cipher(key)?;
        let (nonce, sealed) = ciphertext.split_at(NONCE_SIZE);

        cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| {
                ScrubError::Decryption(
                    "authentication failed: key does not match ciphertext or data was modified"
                        .to_string(),
                )
            })
    }
}
