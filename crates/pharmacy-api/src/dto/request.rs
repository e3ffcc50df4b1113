//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use pharmacy_core::error::AppError;
use pharmacy_entity::permission::PermissionSet;
use pharmacy_entity::user::UserRole;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Navigation query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationQuery {
    /// Current console location; defaults to `/`.
    pub location: Option<String>,
}

/// User list filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    /// Restrict to one role.
    pub role: Option<UserRole>,
}

/// Create staff account request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Role.
    pub role: UserRole,
    /// Explicit grants; role defaults apply when omitted.
    #[serde(default)]
    pub permissions: Option<PermissionSet>,
}

/// Replace role and grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccessRequest {
    /// New role.
    pub role: UserRole,
    /// New grant set.
    #[serde(default)]
    pub permissions: PermissionSet,
}

/// Run derive-based validation, mapping failures to a validation error.
pub fn validate<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
