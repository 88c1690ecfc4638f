//! Payload encoding and decoding for invite tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::types::{
    FormatError, ENTROPY_SIZE, INVITER_LENGTH_SIZE, MAX_INVITER_LENGTH, MIN_TOKEN_SIZE,
    PAYLOAD_HEADER_SIZE, TIMESTAMP_SIZE,
};

/// The signed part of an invite token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitePayload {
    /// Random bytes that make every token unique (16 bytes).
    pub entropy: [u8; ENTROPY_SIZE],
    /// Issuance time in seconds since the Unix epoch.
    pub timestamp: u64,
    /// Inviter identifier (email or username).
    pub inviter: String,
    /// Invitee identifier (email or username).
    pub invitee: String,
}

impl InvitePayload {
    /// Creates a new payload.
    pub fn new(
        entropy: [u8; ENTROPY_SIZE],
        timestamp: u64,
        inviter: impl Into<String>,
        invitee: impl Into<String>,
    ) -> Self {
        Self {
            entropy,
            timestamp,
            inviter: inviter.into(),
            invitee: invitee.into(),
        }
    }

    /// Encode the payload to bytes.
    ///
    /// Format (26-byte header + identifiers):
    /// - [0-15]   entropy (16 bytes)
    /// - [16-23]  timestamp (big-endian u64)
    /// - [24-25]  inviter length (big-endian u16)
    /// - [26..]   inviter bytes, then invitee bytes to the end
    ///
    /// An inviter longer than 65535 bytes is silently truncated.
    pub fn encode(&self) -> Vec<u8> {
        let inviter = truncate_utf8(&self.inviter, MAX_INVITER_LENGTH);

        let mut data =
            Vec::with_capacity(PAYLOAD_HEADER_SIZE + inviter.len() + self.invitee.len());
        data.extend_from_slice(&self.entropy);
        data.extend_from_slice(&self.timestamp.to_be_bytes());
        data.extend_from_slice(&(inviter.len() as u16).to_be_bytes());
        data.extend_from_slice(inviter.as_bytes());
        data.extend_from_slice(self.invitee.as_bytes());
        data
    }

    /// Decode bytes into a payload.
    pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
        if data.len() < PAYLOAD_HEADER_SIZE {
            return Err(FormatError::TooShort {
                len: data.len(),
                min: PAYLOAD_HEADER_SIZE,
            });
        }

        let mut offset = 0;

        let mut entropy = [0u8; ENTROPY_SIZE];
        entropy.copy_from_slice(&data[offset..offset + ENTROPY_SIZE]);
        offset += ENTROPY_SIZE;

        let mut timestamp_bytes = [0u8; TIMESTAMP_SIZE];
        timestamp_bytes.copy_from_slice(&data[offset..offset + TIMESTAMP_SIZE]);
        let timestamp = u64::from_be_bytes(timestamp_bytes);
        offset += TIMESTAMP_SIZE;

        let inviter_len = u16::from_be_bytes([data[offset], data[offset + 1]]) as usize;
        offset += INVITER_LENGTH_SIZE;

        let available = data.len() - offset;
        if inviter_len > available {
            return Err(FormatError::InviterOutOfRange {
                declared: inviter_len,
                available,
            });
        }

        let inviter = std::str::from_utf8(&data[offset..offset + inviter_len])
            .map_err(|_| FormatError::InvalidUtf8)?
            .to_string();
        offset += inviter_len;

        let invitee = std::str::from_utf8(&data[offset..])
            .map_err(|_| FormatError::InvalidUtf8)?
            .to_string();

        Ok(Self {
            entropy,
            timestamp,
            inviter,
            invitee,
        })
    }
}

/// Check if text looks like an invite token.
///
/// Only the transport encoding and the minimum length are checked; the
/// token is not authenticated.
pub fn is_invite_token(text: &str) -> bool {
    match URL_SAFE_NO_PAD.decode(text) {
        Ok(data) => data.len() >= MIN_TOKEN_SIZE,
        Err(_) => false,
    }
}

/// Cut `s` to at most `max` bytes without splitting a character.
fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
