//! Capability guard for route groups.
//!
//! Runs the console's guard evaluation against the bearer-token user. No
//! user yields 401, a failed requirement 403. The resolved [`AuthUser`] is
//! stored in the request extensions for the handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;
use axum::routing::MethodRouter;
use tracing::debug;

use pharmacy_auth::guard::{Requirement, authorize};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// State handed to [`route_guard`].
#[derive(Debug, Clone)]
pub struct GuardState {
    app: AppState,
    requirement: Arc<Requirement>,
}

/// Wrap `route` so every method on it requires `requirement`.
pub fn guarded(
    app: &AppState,
    requirement: Requirement,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    let state = GuardState {
        app: app.clone(),
        requirement: Arc::new(requirement),
    };
    route.route_layer(from_fn_with_state(state, route_guard))
}

/// Guard middleware body.
pub async fn route_guard(
    State(guard): State<GuardState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = match AuthUser::resolve(request.headers(), &guard.app).await {
        Ok(user) => Some(user),
        Err(e) if e.is_authentication() => {
            debug!(path = %request.uri().path(), reason = %e.message, "Unauthenticated request");
            None
        }
        Err(e) => return Err(e.into()),
    };

    authorize(user.as_ref().map(|u| &u.profile), &guard.requirement)?;

    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }
    Ok(next.run(request).await)
}
