//! Route guard decisions.
//!
//! A guard combines the resolved session with a [`Requirement`] and
//! yields one of four outcomes. The console renders the outcome (loading
//! placeholder, login redirect, forbidden view, or content); the API maps
//! it to a status code. Nothing here caches: decide again on every render.

pub mod requirement;
pub mod state;

pub use requirement::Requirement;
pub use state::SessionState;

use serde::Serialize;
use tracing::debug;

use pharmacy_core::error::AppError;
use pharmacy_entity::user::UserProfile;

use crate::rbac::PermissionEvaluator;

/// Outcome of guarding one view.
///
/// Only [`GuardDecision::Authorized`] carries the user, so content can never
/// be rendered without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision<'a> {
    /// The session is still being resolved.
    Loading,
    /// There is no user; send them to the login route.
    Unauthenticated,
    /// The user lacks the required capabilities.
    Forbidden,
    /// Render the guarded content for this user.
    Authorized(&'a UserProfile),
}

/// Decide what a guarded view shows for the given session state.
pub fn decide<'a>(state: &'a SessionState, requirement: &Requirement) -> GuardDecision<'a> {
    match state {
        SessionState::Loading => GuardDecision::Loading,
        SessionState::Resolved(None) => GuardDecision::Unauthenticated,
        SessionState::Resolved(Some(user)) => decide_for_user(user, requirement),
    }
}

fn decide_for_user<'a>(user: &'a UserProfile, requirement: &Requirement) -> GuardDecision<'a> {
    if requirement.is_satisfied_by(&PermissionEvaluator::new(Some(user))) {
        GuardDecision::Authorized(user)
    } else {
        debug!(user_id = %user.id, requirement = %requirement, "Guard denied access");
        GuardDecision::Forbidden
    }
}

/// Server-side form of [`decide`] for an already resolved caller.
///
/// No user becomes an authentication error, a failed requirement an
/// authorization error.
pub fn authorize(user: Option<&UserProfile>, requirement: &Requirement) -> Result<(), AppError> {
    let Some(user) = user else {
        return Err(AppError::authentication("Authentication required"));
    };
    match decide_for_user(user, requirement) {
        GuardDecision::Authorized(_) => Ok(()),
        _ => Err(AppError::authorization(format!(
            "Missing required permission: {requirement}"
        ))),
    }
}
