//! Login, who-am-I, and logout.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pharmacy_core::config::AuthConfig;
use pharmacy_core::error::AppError;
use pharmacy_database::UserStore;
use pharmacy_entity::user::{User, UserProfile};

use crate::jwt::{Claims, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// Bearer token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: UserProfile,
}

/// Issues and validates bearer sessions against the user store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("users", &self.users)
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown email, wrong password, and inactive account all fail with the
    /// same authentication error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let email = email.trim();
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!(email = %email, "Login for unknown email");
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if !user.can_login() {
            warn!(user_id = %user.id, status = %user.status, "Login for inactive account");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let issued = self.encoder.issue(&user)?;

        if let Err(e) = self.users.update_last_login(user.id, Utc::now()).await {
            warn!(user_id = %user.id, error = %e, "Failed to record last login");
        }

        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            user: UserProfile::from(&user),
        })
    }

    /// Validates a token and reloads its user.
    ///
    /// The user is read fresh on every call so role and grant changes apply
    /// to existing tokens.
    pub async fn authenticate(&self, token: &str) -> Result<(Claims, User), AppError> {
        let claims = self.decoder.decode(token).await?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        if !user.can_login() {
            return Err(AppError::authentication("Account is not active"));
        }

        Ok((claims, user))
    }

    /// Profile of the token's user.
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, AppError> {
        let (_, user) = self.authenticate(token).await?;
        Ok(UserProfile::from(&user))
    }

    /// Revokes the token. Already invalid tokens are an authentication error.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let claims = self.decoder.decode(token).await?;
        self.decoder.revoke(claims.jti).await;
        info!(user_id = %claims.sub, jti = %claims.jti, "User logged out");
        Ok(())
    }
}
