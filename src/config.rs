//! Configuration for invite token generators.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_SHORT_CODE_LENGTH, DEFAULT_TTL_SECS, MAX_SHORT_CODE_LENGTH};

/// Configuration for an [`InviteTokenGenerator`](crate::InviteTokenGenerator).
///
/// Serialized form: `{"ttl_secs": 604800, "short_code_length": 10}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    /// How long a token stays valid after issuance.
    #[serde(rename = "ttl_secs", with = "duration_secs")]
    pub ttl: Duration,
    /// Number of characters in a short code.
    pub short_code_length: usize,
}

impl InviteConfig {
    /// Creates a configuration with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            short_code_length: DEFAULT_SHORT_CODE_LENGTH,
        }
    }

    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the short code length, clamped to 1..=43.
    pub fn with_short_code_length(mut self, length: usize) -> Self {
        self.short_code_length = length.clamp(1, MAX_SHORT_CODE_LENGTH);
        self
    }
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
