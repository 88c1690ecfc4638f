//! Payload authentication with truncated HMAC-SHA256.
//!
//! Tags are the first 16 bytes of HMAC-SHA256 over the encoded payload.
//! Verification recomputes the tag and compares in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::types::MAC_SIZE;

type HmacSha256 = Hmac<Sha256>;

/// Computes the full HMAC-SHA256 of `data` under `key`.
///
/// # Arguments
/// * `key` - The signing key (any length)
/// * `data` - Bytes to authenticate
///
/// # Returns
/// The 32-byte digest
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    let digest = mac.finalize().into_bytes();

    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Signs an encoded payload.
///
/// # Returns
/// The truncated 16-byte tag
pub fn sign_payload(payload: &[u8], key: &[u8]) -> [u8; MAC_SIZE] {
    let digest = hmac_sha256(key, payload);
    let mut tag = [0u8; MAC_SIZE];
    tag.copy_from_slice(&digest[..MAC_SIZE]);
    tag
}

/// Verifies a tag over an encoded payload.
///
/// A tag of the wrong length never matches.
pub fn verify_payload(payload: &[u8], tag: &[u8], key: &[u8]) -> bool {
    let expected = sign_payload(payload, key);
    expected[..].ct_eq(tag).into()
}
