//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse-grained identity tag of a console user.
///
/// Only `Admin` carries behavior of its own: it satisfies every
/// capability. All other roles are granted exactly their permission list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full system administrator.
    Admin,
    /// Store manager.
    Manager,
    /// Licensed pharmacist.
    Pharmacist,
    /// Counter and warehouse staff.
    Staff,
}

impl UserRole {
    /// Every role, most privileged first.
    pub const ALL: [UserRole; 4] = [Self::Admin, Self::Manager, Self::Pharmacist, Self::Staff];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Pharmacist => "pharmacist",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = pharmacy_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "pharmacist" => Ok(Self::Pharmacist),
            "staff" => Ok(Self::Staff),
            _ => Err(pharmacy_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, manager, pharmacist, staff"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("PHARMACIST".parse::<UserRole>().unwrap(), UserRole::Pharmacist);
        assert!("customer".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_only_admin_is_admin() {
        let admins: Vec<_> = UserRole::ALL.iter().filter(|r| r.is_admin()).collect();
        assert_eq!(admins, vec![&UserRole::Admin]);
    }
}
