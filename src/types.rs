//! Type definitions and format constants for invite tokens.

use thiserror::Error;

/// Token format version.
///
/// Not carried on the wire; tokens from a different layout simply fail
/// authentication.
pub const FORMAT_VERSION: u8 = 1;

/// Size of the random entropy field in bytes.
pub const ENTROPY_SIZE: usize = 16;

/// Size of the big-endian timestamp field in bytes.
pub const TIMESTAMP_SIZE: usize = 8;

/// Size of the big-endian inviter length prefix in bytes.
pub const INVITER_LENGTH_SIZE: usize = 2;

/// Longest inviter identifier the length prefix can describe.
pub const MAX_INVITER_LENGTH: usize = u16::MAX as usize;

/// Size of the truncated HMAC-SHA256 tag in bytes.
pub const MAC_SIZE: usize = 16;

/// Size of the fixed payload header (entropy + timestamp + inviter length).
pub const PAYLOAD_HEADER_SIZE: usize = ENTROPY_SIZE + TIMESTAMP_SIZE + INVITER_LENGTH_SIZE;

/// Smallest possible decoded token: empty identifiers plus the tag.
pub const MIN_TOKEN_SIZE: usize = PAYLOAD_HEADER_SIZE + MAC_SIZE;

/// Minimum signing key length in bytes.
pub const MIN_KEY_SIZE: usize = 32;

/// Size of the derived storage encryption key in bytes.
pub const STORAGE_KEY_SIZE: usize = 32;

/// Size of the storage AEAD nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Size of the storage AEAD authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Default token lifetime: seven days.
pub const DEFAULT_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Default short code length in characters.
pub const DEFAULT_SHORT_CODE_LENGTH: usize = 10;

/// Unpadded base64 length of a full SHA-256 digest.
pub const MAX_SHORT_CODE_LENGTH: usize = 43;

/// Storage key derivation salt.
pub const STORAGE_KEY_SALT: &[u8] = b"InviteToken-v1-storage";

/// Storage key derivation info.
pub const STORAGE_KEY_INFO: &[u8] = b"chacha20poly1305-key";

/// Structural problems found while decoding a payload.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer bytes than the fixed header needs.
    #[error("Payload too short: {len} bytes (minimum {min})")]
    TooShort { len: usize, min: usize },

    /// The inviter length prefix points past the end of the payload.
    #[error("Inviter length {declared} exceeds available {available} bytes")]
    InviterOutOfRange { declared: usize, available: usize },

    /// An identifier is not valid UTF-8.
    #[error("Identifier is not valid UTF-8")]
    InvalidUtf8,
}

/// Errors that can occur during invite token operations.
#[derive(Error, Debug)]
pub enum InviteError {
    /// Signing key below the minimum length.
    #[error("Signing key too short: {0} bytes (minimum {MIN_KEY_SIZE})")]
    KeyTooShort(usize),

    /// Token is malformed, forged, or addressed to someone else.
    #[error("Invalid invite token")]
    InvalidToken,

    /// Token is authentic but older than the configured TTL.
    #[error("Invite token expired")]
    TokenExpired,

    /// Failed to generate secure random bytes.
    #[error("Random generation failed")]
    RandomGenerationFailed,

    /// Storage encryption failed.
    #[error("Storage encryption failed: {0}")]
    StorageEncryption(String),

    /// Storage decryption failed.
    #[error("Storage decryption failed: {0}")]
    StorageDecryption(String),
}

pub type Result<T> = std::result::Result<T, InviteError>;
