//! Signing key handling and storage key derivation.

use std::fmt;

use hkdf::Hkdf;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::types::{
    InviteError, Result, MIN_KEY_SIZE, STORAGE_KEY_INFO, STORAGE_KEY_SALT, STORAGE_KEY_SIZE,
};

/// Secret key used to sign invite tokens and derive short codes.
///
/// The bytes are wiped on drop and never printed.
#[derive(Clone)]
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Creates a signing key from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Key material, at least 32 bytes
    pub fn new(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_KEY_SIZE {
            return Err(InviteError::KeyTooShort(bytes.len()));
        }
        Ok(Self(Zeroizing::new(bytes.to_vec())))
    }

    /// Generates a random 32-byte signing key.
    pub fn generate() -> Result<Self> {
        let mut bytes = Zeroizing::new(vec![0u8; MIN_KEY_SIZE]);
        OsRng
            .try_fill_bytes(bytes.as_mut_slice())
            .map_err(|_| InviteError::RandomGenerationFailed)?;
        Ok(Self(bytes))
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; construction rejects short keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey([REDACTED; {} bytes])", self.0.len())
    }
}

/// Derive the storage encryption key from a signing key using HKDF-SHA256.
///
/// # Returns
/// 32-byte key for the storage cipher
pub fn derive_storage_key(signing_key: &SigningKey) -> Zeroizing<[u8; STORAGE_KEY_SIZE]> {
    let hkdf = Hkdf::<Sha256>::new(Some(STORAGE_KEY_SALT), signing_key.as_bytes());
    let mut storage_key = Zeroizing::new([0u8; STORAGE_KEY_SIZE]);
    hkdf.expand(STORAGE_KEY_INFO, &mut storage_key[..])
        .expect("32 bytes is a valid length for HKDF-SHA256");
    storage_key
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORAGE_KEY_HEX: &str =
        "0256f2e3b5f3e33c4ca0ef43cdb2db5e78f93d8e6f9ad9d42e00d9031604c4af";

    #[test]
    fn test_key_too_short() {
        let result = SigningKey::new(&[0u8; MIN_KEY_SIZE - 1]);
        assert!(matches!(result, Err(InviteError::KeyTooShort(31))));

        let result = SigningKey::new(b"");
        assert!(matches!(result, Err(InviteError::KeyTooShort(0))));
    }

    #[test]
    fn test_key_minimum_and_longer() {
        assert_eq!(SigningKey::new(&[1u8; 32]).unwrap().len(), 32);
        assert_eq!(SigningKey::new(&[1u8; 64]).unwrap().len(), 64);
    }

    #[test]
    fn test_generate() {
        let first = SigningKey::generate().unwrap();
        let second = SigningKey::generate().unwrap();
        assert_eq!(first.len(), MIN_KEY_SIZE);
        assert_ne!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = SigningKey::new(&[0xAB; 32]).unwrap();
        let printed = format!("{:?}", key);
        assert_eq!(printed, "SigningKey([REDACTED; 32 bytes])");
        assert!(!printed.contains("171"));
    }

    #[test]
    fn test_storage_key_vector() {
        let key = SigningKey::new(&[0x42; 32]).unwrap();
        let storage_key = derive_storage_key(&key);
        assert_eq!(hex::encode(&storage_key[..]), STORAGE_KEY_HEX);
    }

    #[test]
    fn test_storage_key_differs_from_signing_key() {
        let key = SigningKey::new(&[0x42; 32]).unwrap();
        let storage_key = derive_storage_key(&key);
        assert_ne!(&storage_key[..], key.as_bytes());
    }
}
