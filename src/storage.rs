//! Encryption of invite tokens for storage at rest.
//!
//! The token's own MAC protects its integrity; this layer keeps the embedded
//! identifiers confidential while a token sits in a database.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::{rngs::OsRng, RngCore};

use crate::types::{InviteError, Result, NONCE_SIZE, TAG_SIZE};

// ============================================================================
// Storage Encryptor
// ============================================================================

/// Trait for authenticated encryption of strings before they are persisted.
///
/// Implementations must provide integrity as well as confidentiality, and
/// must use fresh randomness per call.
pub trait StorageEncryptor: Send + Sync {
    /// Encrypt `plaintext` under `key`.
    fn encrypt(&self, key: &[u8], plaintext: &str) -> Result<String>;

    /// Decrypt `ciphertext` under `key`, failing on tampering or a wrong key.
    fn decrypt(&self, key: &[u8], ciphertext: &str) -> Result<String>;
}

/// ChaCha20-Poly1305 implementation of StorageEncryptor.
///
/// Text form: base64url (no padding) of `nonce (12 bytes) || ciphertext || tag (16 bytes)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaChaStorageEncryptor;

impl ChaChaStorageEncryptor {
    /// Creates a new ChaCha20-Poly1305 storage encryptor.
    pub fn new() -> Self {
        Self
    }
}

impl StorageEncryptor for ChaChaStorageEncryptor {
    fn encrypt(&self, key: &[u8], plaintext: &str) -> Result<String> {
        let cipher = ChaCha20Poly1305::new_from_slice(key)
            .map_err(|e| InviteError::StorageEncryption(format!("Cipher init failed: {}", e)))?;

        // Generate random nonce
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce_bytes)
            .map_err(|_| InviteError::RandomGenerationFailed)?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| InviteError::StorageEncryption(format!("Encryption failed: {}", e)))?;

        let mut data = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        data.extend_from_slice(&nonce_bytes);
        data.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(data))
    }

    fn decrypt(&self, key: &[u8], ciphertext: &str) -> Result<String> {
        let data = URL_SAFE_NO_PAD
            .decode(ciphertext)
            .map_err(|e| InviteError::StorageDecryption(format!("Invalid base64url: {}", e)))?;

        if data.len() < NONCE_SIZE + TAG_SIZE {
            return Err(InviteError::StorageDecryption(format!(
                "Ciphertext too short: {} bytes (minimum {})",
                data.len(),
                NONCE_SIZE + TAG_SIZE
            )));
        }

        let cipher = ChaCha20Poly1305::new_from_slice(key)
            .map_err(|e| InviteError::StorageDecryption(format!("Cipher init failed: {}", e)))?;
        let (nonce_bytes, sealed) = data.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = cipher
            .decrypt(nonce, sealed)
            .map_err(|e| InviteError::StorageDecryption(format!("Decryption failed: {}", e)))?;

        String::from_utf8(plaintext)
            .map_err(|e| InviteError::StorageDecryption(format!("Invalid UTF-8: {}", e)))
    }
}
