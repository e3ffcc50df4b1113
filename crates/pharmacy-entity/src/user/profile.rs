//! The user shape exchanged between the API and the console.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::User;
use super::role::UserRole;
use crate::permission::PermissionSet;

/// Profile returned by login and who-am-I.
///
/// This is the identity every permission check is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Coarse role.
    pub role: UserRole,
    /// Explicit capability grants.
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl UserProfile {
    /// Build a profile with a fresh ID, mostly useful in tests and fixtures.
    pub fn new<I, S>(name: &str, role: UserRole, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@pharmacy.local", name.to_lowercase()),
            role,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            permissions: user.permission_set(),
        }
    }
}
