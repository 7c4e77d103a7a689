//! Symmetric encryption for the reversible transform
//!
//! Provides the [`SymmetricCipher`] trait and the AES-256-GCM implementation.

pub mod aes;
pub mod key;

pub use aes::AesGcmCipher;
pub use key::CipherKey;

use crate::domain::Result;

/// Trait for symmetric cipher implementations
pub trait SymmetricCipher: Send + Sync {
    /// Generate a fresh random key
    fn generate_key(&self) -> Result<CipherKey>;

    /// Encrypt plaintext bytes
    fn encrypt(&self, plaintext: &[u8], key: &CipherKey) -> Result<Vec<u8>>;

    /// Decrypt ciphertext bytes
    ///
    /// Fails with [`ScrubError::Decryption`](crate::domain::ScrubError::Decryption)
    /// if the key does not match or the ciphertext is malformed.
    fn decrypt(&self, ciphertext: &[u8], key: &CipherKey) -> Result<Vec<u8>>;
}
