//! Invite token generation and verification.
//!
//! A token is `base64url(payload || tag)` where the payload binds the
//! inviter, the invitee and the issuance time. Verification passes through
//! fixed gates: well-formed, authentic, fresh and, for
//! [`InviteTokenGenerator::verify_for_recipient`], addressed to the caller.
//! Every gate except freshness fails with the same
//! [`InviteError::InvalidToken`].

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::config::InviteConfig;
use crate::expiry::{is_expired, now_secs};
use crate::keys::{derive_storage_key, SigningKey};
use crate::mac::{sign_payload, verify_payload};
use crate::payload::InvitePayload;
use crate::short_code::short_code;
use crate::storage::{ChaChaStorageEncryptor, StorageEncryptor};
use crate::types::{
    InviteError, Result, ENTROPY_SIZE, MAC_SIZE, MIN_TOKEN_SIZE, STORAGE_KEY_SIZE,
};

/// Verified contents of an invite token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteTokenData {
    /// Who sent the invite.
    pub inviter: String,
    /// Who the invite is for.
    pub invitee: String,
    /// Issuance time in seconds since the Unix epoch.
    pub created_at: u64,
}

impl InviteTokenData {
    /// Issuance time as a `SystemTime`.
    pub fn created_at_time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.created_at)
    }

    /// Last second (inclusive) at which the token is still fresh under `ttl`.
    pub fn expires_at(&self, ttl: Duration) -> u64 {
        self.created_at.saturating_add(ttl.as_secs())
    }
}

/// Mints and verifies invite tokens under a single signing key.
///
/// Holds no mutable state, so one generator can be shared across threads.
pub struct InviteTokenGenerator<E = ChaChaStorageEncryptor>
where
    E: StorageEncryptor,
{
    /// Key for token MACs and short codes.
    signing_key: SigningKey,
    /// Key handed to the storage encryptor, derived from the signing key.
    storage_key: Zeroizing<[u8; STORAGE_KEY_SIZE]>,
    /// Configuration.
    config: InviteConfig,
    /// Encryptor for tokens at rest.
    encryptor: E,
}

impl InviteTokenGenerator<ChaChaStorageEncryptor> {
    /// Creates a generator that encrypts stored tokens with ChaCha20-Poly1305.
    pub fn with_default_storage(signing_key: &[u8], config: InviteConfig) -> Result<Self> {
        Self::new(signing_key, config, ChaChaStorageEncryptor::new())
    }
}

impl<E> InviteTokenGenerator<E>
where
    E: StorageEncryptor,
{
    /// Creates a new generator.
    ///
    /// # Arguments
    /// * `signing_key` - Secret key, at least 32 bytes
    /// * `config` - TTL and short code settings
    /// * `encryptor` - Encryptor used by the storage operations
    ///
    /// # Errors
    /// `KeyTooShort` if the key is below 32 bytes.
    pub fn new(signing_key: &[u8], config: InviteConfig, encryptor: E) -> Result<Self> {
        let signing_key = SigningKey::new(signing_key)?;
        let storage_key = derive_storage_key(&signing_key);

        tracing::debug!(
            key_len = signing_key.len(),
            ttl_secs = config.ttl.as_secs(),
            "invite token generator ready"
        );

        Ok(Self {
            signing_key,
            storage_key,
            config,
            encryptor,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &InviteConfig {
        &self.config
    }

    /// Generates a token for `invitee` from `inviter`, stamped with the current time.
    pub fn generate(&self, inviter: &str, invitee: &str) -> Result<String> {
        self.generate_at(inviter, invitee, now_secs())
    }

    /// Generates a token stamped with `now` (seconds since the Unix epoch).
    ///
    /// # Errors
    /// `RandomGenerationFailed` if the OS entropy source is unavailable.
    pub fn generate_at(&self, inviter: &str, invitee: &str, now: u64) -> Result<String> {
        let mut entropy = [0u8; ENTROPY_SIZE];
        OsRng
            .try_fill_bytes(&mut entropy)
            .map_err(|_| InviteError::RandomGenerationFailed)?;

        let payload = InvitePayload::new(entropy, now, inviter, invitee);
        let token = self.seal(&payload);

        tracing::debug!(token_len = token.len(), "issued invite token");
        Ok(token)
    }

    /// Verifies a token against the current time.
    pub fn verify(&self, token: &str) -> Result<InviteTokenData> {
        self.verify_at(token, now_secs())
    }

    /// Verifies a token as of `now` (seconds since the Unix epoch).
    ///
    /// # Errors
    /// * `InvalidToken` - bad encoding, too short, MAC mismatch or malformed payload
    /// * `TokenExpired` - authentic but older than the TTL
    pub fn verify_at(&self, token: &str, now: u64) -> Result<InviteTokenData> {
        let data = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| InviteError::InvalidToken)?;

        if data.len() < MIN_TOKEN_SIZE {
            return Err(InviteError::InvalidToken);
        }

        let (payload_bytes, tag) = data.split_at(data.len() - MAC_SIZE);
        if !verify_payload(payload_bytes, tag, self.signing_key.as_bytes()) {
            return Err(InviteError::InvalidToken);
        }

        let payload = InvitePayload::decode(payload_bytes).map_err(|_| InviteError::InvalidToken)?;

        // Only checked once the MAC holds
        if is_expired(payload.timestamp, self.config.ttl, now) {
            return Err(InviteError::TokenExpired);
        }

        Ok(InviteTokenData {
            inviter: payload.inviter,
            invitee: payload.invitee,
            created_at: payload.timestamp,
        })
    }

    /// Verifies a token and requires its invitee to equal `expected_invitee` exactly.
    ///
    /// Comparison is case-sensitive with no normalization.
    pub fn verify_for_recipient(
        &self,
        token: &str,
        expected_invitee: &str,
    ) -> Result<InviteTokenData> {
        self.verify_for_recipient_at(token, expected_invitee, now_secs())
    }

    /// Recipient-scoped verification as of `now`.
    pub fn verify_for_recipient_at(
        &self,
        token: &str,
        expected_invitee: &str,
        now: u64,
    ) -> Result<InviteTokenData> {
        let data = self.verify_at(token, now)?;
        if data.invitee != expected_invitee {
            return Err(InviteError::InvalidToken);
        }
        Ok(data)
    }

    /// Derives the short lookup code for a token.
    ///
    /// The token is not verified.
    pub fn short_code(&self, token: &str) -> String {
        short_code(
            token,
            self.signing_key.as_bytes(),
            self.config.short_code_length,
        )
    }

    /// Encrypts a token for storage.
    pub fn encrypt_for_storage(&self, token: &str) -> Result<String> {
        self.encryptor.encrypt(&self.storage_key[..], token)
    }

    /// Decrypts a stored token.
    ///
    /// The result still has to go through [`verify`](Self::verify) before use.
    pub fn decrypt_from_storage(&self, ciphertext: &str) -> Result<String> {
        self.encryptor.decrypt(&self.storage_key[..], ciphertext)
    }

    /// Signs a payload and encodes `payload || tag` as transport text.
    fn seal(&self, payload: &InvitePayload) -> String {
        let mut data = payload.encode();
        let tag = sign_payload(&data, self.signing_key.as_bytes());
        data.extend_from_slice(&tag);
        URL_SAFE_NO_PAD.encode(data)
    }
}

impl<E> fmt::Debug for InviteTokenGenerator<E>
where
    E: StorageEncryptor,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InviteTokenGenerator")
            .field("signing_key", &self.signing_key)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
