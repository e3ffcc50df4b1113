//! Capability predicates over the current user.
//!
//! Every check is a pure function of the user (or its absence) and the
//! requested capabilities. `admin` satisfies everything; any other role
//! satisfies a capability iff it is a literal member of its grants. With no
//! user every check is false.

use pharmacy_entity::permission::{Action, Resource};
use pharmacy_entity::user::UserProfile;

/// True if the user may exercise `capability`.
pub fn has_permission(user: Option<&UserProfile>, capability: &str) -> bool {
    match user {
        None => false,
        Some(user) if user.role.is_admin() => true,
        Some(user) => user.permissions.contains(capability),
    }
}

/// True if the user holds at least one of `capabilities`.
///
/// An empty list is false for everyone except admins.
pub fn has_any_permission<S: AsRef<str>>(user: Option<&UserProfile>, capabilities: &[S]) -> bool {
    match user {
        None => false,
        Some(user) if user.role.is_admin() => true,
        Some(user) => capabilities
            .iter()
            .any(|c| user.permissions.contains(c.as_ref())),
    }
}

/// True if the user holds every one of `capabilities`.
///
/// An empty list is vacuously true for any authenticated user.
pub fn has_all_permissions<S: AsRef<str>>(
    user: Option<&UserProfile>,
    capabilities: &[S],
) -> bool {
    match user {
        None => false,
        Some(user) if user.role.is_admin() => true,
        Some(user) => capabilities
            .iter()
            .all(|c| user.permissions.contains(c.as_ref())),
    }
}

/// Borrowing view of the current user exposing the capability predicates.
///
/// The evaluator holds a reference into the session snapshot it was built
/// from, so a new one has to be taken after every identity change.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a> {
    user: Option<&'a UserProfile>,
}

impl<'a> PermissionEvaluator<'a> {
    /// Evaluator for the given user, or for nobody.
    pub fn new(user: Option<&'a UserProfile>) -> Self {
        Self { user }
    }

    /// Evaluator with no user; every check fails.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// The user being evaluated.
    pub fn user(&self) -> Option<&'a UserProfile> {
        self.user
    }

    /// Whether there is a user at all.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the user is an admin.
    pub fn is_admin(&self) -> bool {
        self.user.is_some_and(|u| u.role.is_admin())
    }

    /// See [`has_permission`].
    pub fn has_permission(&self, capability: impl AsRef<str>) -> bool {
        has_permission(self.user, capability.as_ref())
    }

    /// See [`has_any_permission`].
    pub fn has_any_permission<S: AsRef<str>>(&self, capabilities: &[S]) -> bool {
        has_any_permission(self.user, capabilities)
    }

    /// See [`has_all_permissions`].
    pub fn has_all_permissions<S: AsRef<str>>(&self, capabilities: &[S]) -> bool {
        has_all_permissions(self.user, capabilities)
    }

    /// Check `<action>_<resource>`.
    pub fn can(&self, action: Action, resource: Resource) -> bool {
        self.has_permission(resource.capability(action))
    }

    /// Check `read_<resource>`.
    pub fn can_read(&self, resource: Resource) -> bool {
        self.can(Action::Read, resource)
    }

    /// Check `write_<resource>`.
    pub fn can_write(&self, resource: Resource) -> bool {
        self.can(Action::Write, resource)
    }

    /// Check `delete_<resource>`.
    pub fn can_delete(&self, resource: Resource) -> bool {
        self.can(Action::Delete, resource)
    }

    /// Check `manage_<resource>`.
    pub fn can_manage(&self, resource: Resource) -> bool {
        self.can(Action::Manage, resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_entity::user::UserRole;

    const NONE: [&str; 0] = [];

    fn staff(perms: &[&str]) -> UserProfile {
        UserProfile::new("staff", UserRole::Staff, perms.iter().copied())
    }

    fn admin() -> UserProfile {
        UserProfile::new("root", UserRole::Admin, NONE)
    }

    #[test]
    fn test_non_admin_without_grant_is_denied() {
        for role in [UserRole::Manager, UserRole::Pharmacist, UserRole::Staff] {
            let user = UserProfile::new("u", role, ["read_products"]);
            assert!(!has_permission(Some(&user), "write_products"), "{role}");
            assert!(has_permission(Some(&user), "read_products"), "{role}");
        }
    }

    #[test]
    fn test_admin_bypasses_regardless_of_grants() {
        let bare = admin();
        let granted = UserProfile::new("root", UserRole::Admin, ["read_products"]);

        for user in [&bare, &granted] {
            assert!(has_permission(Some(user), "delete_users"));
            assert!(has_permission(Some(user), "anything_at_all"));
        }
    }

    #[test]
    fn test_no_user_fails_every_check() {
        assert!(!has_permission(None, "read_products"));
        assert!(!has_any_permission(None, &["read_products"]));
        assert!(!has_all_permissions(None, &["read_products"]));
        assert!(!has_all_permissions(None, &NONE));
    }

    #[test]
    fn test_any_with_empty_list() {
        assert!(!has_any_permission(Some(&staff(&["read_products"])), &NONE));
        assert!(has_any_permission(Some(&admin()), &NONE));
    }

    #[test]
    fn test_all_with_empty_list_is_vacuously_true() {
        assert!(has_all_permissions(Some(&staff(&[])), &NONE));
        assert!(has_all_permissions(Some(&admin()), &NONE));
    }

    #[test]
    fn test_any_and_all() {
        let user = staff(&["read_orders", "write_orders"]);
        assert!(has_any_permission(Some(&user), &["delete_orders", "write_orders"]));
        assert!(!has_all_permissions(Some(&user), &["delete_orders", "write_orders"]));
        assert!(has_all_permissions(Some(&user), &["read_orders", "write_orders"]));
    }

    #[test]
    fn test_resource_shorthands() {
        let user = staff(&["read_inventory", "manage_settings"]);
        let eval = PermissionEvaluator::new(Some(&user));

        assert!(eval.can_read(Resource::Inventory));
        assert!(!eval.can_write(Resource::Inventory));
        assert!(!eval.can_delete(Resource::Inventory));
        assert!(eval.can_manage(Resource::Settings));
        assert!(!eval.is_admin());
    }

    #[test]
    fn test_evaluator_follows_identity_change() {
        let before = staff(&["read_products"]);
        let after = staff(&[]);

        assert!(PermissionEvaluator::new(Some(&before)).has_permission("read_products"));
        assert!(!PermissionEvaluator::new(Some(&after)).has_permission("read_products"));
        assert!(!PermissionEvaluator::anonymous().is_authenticated());
    }
}
