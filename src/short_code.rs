//! Short lookup codes derived from invite tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::mac::hmac_sha256;
use crate::types::MAX_SHORT_CODE_LENGTH;

/// Derives a short, deterministic code for a token.
///
/// The code is the URL-safe base64 form of HMAC-SHA256(key, token), cut to
/// `length` characters (clamped to 1..=43).
pub fn short_code(token: &str, key: &[u8], length: usize) -> String {
    let digest = hmac_sha256(key, token.as_bytes());
    let mut code = URL_SAFE_NO_PAD.encode(digest);
    code.truncate(length.clamp(1, MAX_SHORT_CODE_LENGTH));
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOKEN: &str = "EREREREREREREREREREREQAAAABlU_EAABFhbGljZUBleGFtcGxlLmNvbWJvYkBleGFtcGxlLmNvbfvnvC9DvRBz2jqUjbTkX2Y";

    #[test]
    fn test_short_code_vector() {
        assert_eq!(short_code(TEST_TOKEN, &[0x42; 32], 10), "LNWaSADxdo");
        assert_eq!(
            short_code(TEST_TOKEN, &[0x42; 32], MAX_SHORT_CODE_LENGTH),
            "LNWaSADxdoVg3YUMs8j0SGMPHQw185nZafLqmKedPy4"
        );
    }

    #[test]
    fn test_deterministic() {
        let key = [0x42u8; 32];
        assert_eq!(short_code("token", &key, 10), short_code("token", &key, 10));
    }

    #[test]
    fn test_depends_on_key_and_token() {
        let key = [0x42u8; 32];
        let code = short_code("token-a", &key, 10);
        assert_ne!(code, short_code("token-b", &key, 10));
        assert_ne!(code, short_code("token-a", &[0x43u8; 32], 10));
    }

    #[test]
    fn test_length_clamped() {
        let key = [0x42u8; 32];
        assert_eq!(short_code("token", &key, 0).len(), 1);
        assert_eq!(short_code("token", &key, 16).len(), 16);
        assert_eq!(short_code("token", &key, 500).len(), MAX_SHORT_CODE_LENGTH);
    }

    #[test]
    fn test_url_safe_alphabet() {
        let key = [0x42u8; 32];
        for i in 0..64 {
            let code = short_code(&format!("token-{}", i), &key, MAX_SHORT_CODE_LENGTH);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }
}
