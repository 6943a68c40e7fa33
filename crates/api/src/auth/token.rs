//! Opaque auth-session tokens.
//!
//! A token is random material handed to the client once at registration or
//! login; only its SHA-256 hex digest is stored server-side so a database
//! leak does not compromise active sessions. There is nothing to decode in
//! a token: possession of one that hashes to a live `auth_sessions` row is
//! the entire proof of identity.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Configuration for auth-session issuance.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Auth session lifetime in hours (default: 168 = 7 days).
    pub session_ttl_hours: i64,
    /// Minimum accepted password length (default: 8).
    pub password_min_length: usize,
}

/// Default session lifetime in hours.
const DEFAULT_SESSION_TTL_HOURS: i64 = 168;
/// Default minimum password length.
const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `SESSION_TTL_HOURS`   | no       | `168`   |
    /// | `PASSWORD_MIN_LENGTH` | no       | `8`     |
    pub fn from_env() -> Self {
        let session_ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_SESSION_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        let password_min_length: usize = std::env::var("PASSWORD_MIN_LENGTH")
            .unwrap_or_else(|_| DEFAULT_PASSWORD_MIN_LENGTH.to_string())
            .parse()
            .expect("PASSWORD_MIN_LENGTH must be a valid usize");

        Self {
            session_ttl_hours,
            password_min_length,
        }
    }
}

/// Generate a cryptographically random session token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext
/// is sent to the client; only the hash is persisted server-side.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
///
/// Use this to resolve an incoming token against the stored hash.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
