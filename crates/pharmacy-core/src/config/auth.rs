//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Bearer token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Minimum password length for new accounts.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Upper bound on revoked token IDs kept in memory. Must exceed the
    /// logouts expected within one token lifetime, or older revocations
    /// can be evicted while their tokens are still valid.
    #[serde(default = "default_revocation_capacity")]
    pub revocation_capacity: u64,
    /// Admin account created at startup when no account has this email.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// First admin account, for fresh installs and the in-memory store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    /// Display name.
    #[serde(default = "default_admin_name")]
    pub name: String,
    /// Login email.
    pub email: String,
    /// Initial password; must satisfy the password policy.
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl(),
            password_min_length: default_password_min(),
            revocation_capacity: default_revocation_capacity(),
            bootstrap_admin: None,
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    // one working day
    12 * 60
}

fn default_password_min() -> usize {
    8
}

fn default_revocation_capacity() -> u64 {
    100_000
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}
