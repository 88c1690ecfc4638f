//! InviteToken - compact, tamper-evident invite tokens
//!
//! Tokens bind an inviter, an invitee and an issuance time under a truncated
//! HMAC-SHA256 tag, and can be wrapped with ChaCha20-Poly1305 for storage.

mod types;
mod keys;
mod config;
mod payload;
mod mac;
mod expiry;
mod short_code;
mod storage;
mod token;

pub use types::*;
pub use keys::*;
pub use config::*;
pub use payload::*;
pub use mac::*;
pub use expiry::*;
pub use short_code::*;
pub use storage::*;
pub use token::*;
