//! Resolution state of the console session.

use serde::{Deserialize, Serialize};

use pharmacy_entity::user::UserProfile;

use crate::rbac::PermissionEvaluator;

/// What is known about the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    /// Who-am-I has not settled yet.
    #[default]
    Loading,
    /// Resolution finished, with or without a user.
    Resolved(Option<UserProfile>),
}

impl SessionState {
    /// Resolved with no user.
    pub fn anonymous() -> Self {
        Self::Resolved(None)
    }

    /// Resolved with a user.
    pub fn authenticated(user: UserProfile) -> Self {
        Self::Resolved(Some(user))
    }

    /// The loading flag.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The current user, if resolved and present.
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Resolved(user) => user.as_ref(),
            Self::Loading => None,
        }
    }

    /// Capability predicates over the current user.
    pub fn evaluator(&self) -> PermissionEvaluator<'_> {
        PermissionEvaluator::new(self.user())
    }
}
