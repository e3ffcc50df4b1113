//! Bearer token validation and revocation.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use moka::future::Cache;
use tracing::{debug, warn};
use uuid::Uuid;

use pharmacy_core::config::AuthConfig;
use pharmacy_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens and tracks revoked token IDs.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Revoked token IDs. Entries outlive any token they could match.
    revoked: Cache<Uuid, ()>,
    /// Bound on `revoked`; past it the cache may evict live revocations.
    revocation_capacity: u64,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .field("revoked", &self.revoked.entry_count())
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew

        let revoked = Cache::builder()
            .max_capacity(config.revocation_capacity)
            .time_to_live(Duration::from_secs(config.token_ttl_minutes * 60 + 60))
            .build();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            revoked,
            revocation_capacity: config.revocation_capacity,
        }
    }

    /// Decodes a token and checks signature, expiry, and revocation.
    pub async fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })?
            .claims;

        if self.revoked.contains_key(&claims.jti) {
            debug!(jti = %claims.jti, "Rejected revoked token");
            return Err(AppError::authentication("Token has been revoked"));
        }

        Ok(claims)
    }

    /// Revokes a token by its ID.
    ///
    /// The list holds at most `auth.revocation_capacity` IDs. Once full,
    /// the cache may drop a revocation before the token expires, so the
    /// capacity has to exceed the logouts expected within one token TTL.
    pub async fn revoke(&self, jti: Uuid) {
        self.revoked.insert(jti, ()).await;
        self.revoked.run_pending_tasks().await;

        let held = self.revoked.entry_count();
        if near_capacity(held, self.revocation_capacity) {
            warn!(
                held,
                capacity = self.revocation_capacity,
                "Revocation list is nearly full; raise auth.revocation_capacity"
            );
        }
    }

    /// Number of revocations currently held.
    pub fn revoked_count(&self) -> u64 {
        self.revoked.entry_count()
    }
}

/// True once `held` reaches 90% of `capacity`.
fn near_capacity(held: u64, capacity: u64) -> bool {
    held.saturating_mul(10) >= capacity.saturating_mul(9)
}
