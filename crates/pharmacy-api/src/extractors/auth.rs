//! `AuthUser` extractor: pulls the bearer token from the Authorization header and resolves its user.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use pharmacy_core::error::AppError;
use pharmacy_entity::user::UserProfile;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller behind a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Freshly loaded profile.
    pub profile: UserProfile,
    /// The raw bearer token.
    pub token: String,
}

impl std::ops::Deref for AuthUser {
    type Target = UserProfile;
    fn deref(&self) -> &Self::Target {
        &self.profile
    }
}

/// The bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))
}

impl AuthUser {
    /// Resolve the caller from request headers.
    pub async fn resolve(headers: &HeaderMap, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(headers)?;
        let profile = state.auth.current_user(token).await?;
        Ok(Self {
            profile,
            token: token.to_string(),
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The route guard already resolved the caller.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        Ok(Self::resolve(&parts.headers, state).await?)
    }
}
