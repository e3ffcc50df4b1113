//! Default capability grants per role.
//!
//! These seed the permission list of newly provisioned accounts when no
//! explicit list is supplied. Once stored, an account's grants are edited
//! independently of its role.

use std::collections::HashMap;

use pharmacy_entity::permission::{Action, PermissionSet, Resource};
use pharmacy_entity::user::UserRole;

/// Role → default grant set.
#[derive(Debug, Clone)]
pub struct RolePolicies {
    defaults: HashMap<UserRole, PermissionSet>,
}

impl RolePolicies {
    /// Creates the default policy table.
    pub fn new() -> Self {
        use Action::{Read, Write};
        use Resource::*;

        let mut defaults = HashMap::new();

        // Admin needs no grants; the evaluator bypasses for the role.
        defaults.insert(UserRole::Admin, PermissionSet::new());

        defaults.insert(
            UserRole::Manager,
            grants(&[
                (Read, Dashboard),
                (Read, Products),
                (Write, Products),
                (Read, Categories),
                (Write, Categories),
                (Read, Inventory),
                (Write, Inventory),
                (Read, Suppliers),
                (Write, Suppliers),
                (Read, GoodsReceipts),
                (Write, GoodsReceipts),
                (Read, Orders),
                (Write, Orders),
                (Read, Customers),
                (Read, Reports),
                (Read, Staff),
            ]),
        );

        defaults.insert(
            UserRole::Pharmacist,
            grants(&[
                (Read, Dashboard),
                (Read, Products),
                (Read, Categories),
                (Read, Inventory),
                (Write, Inventory),
                (Read, Orders),
                (Write, Orders),
            ]),
        );

        defaults.insert(
            UserRole::Staff,
            grants(&[
                (Read, Dashboard),
                (Read, Products),
                (Read, Categories),
                (Read, Orders),
            ]),
        );

        Self { defaults }
    }

    /// Returns the default grants for `role`.
    pub fn default_permissions(&self, role: UserRole) -> PermissionSet {
        self.defaults.get(&role).cloned().unwrap_or_default()
    }
}

impl Default for RolePolicies {
    fn default() -> Self {
        Self::new()
    }
}

fn grants(pairs: &[(Action, Resource)]) -> PermissionSet {
    pairs
        .iter()
        .map(|&(action, resource)| resource.capability(action))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_defaults_are_empty() {
        assert!(RolePolicies::new().default_permissions(UserRole::Admin).is_empty());
    }

    #[test]
    fn test_staff_is_read_only() {
        let staff = RolePolicies::new().default_permissions(UserRole::Staff);
        assert!(staff.contains("read_products"));
        assert!(staff.iter().all(|c| c.starts_with("read_")));
    }

    #[test]
    fn test_manager_cannot_touch_users() {
        let manager = RolePolicies::new().default_permissions(UserRole::Manager);
        assert!(manager.contains("write_goods_receipts"));
        assert!(!manager.iter().any(|c| c.ends_with("_users")));
    }
}
