//! Menu tree and permission filtering.

use serde::{Deserialize, Serialize};

use pharmacy_entity::permission::Capability;

use crate::rbac::PermissionEvaluator;

/// One entry in the navigation tree.
///
/// A group is declared with [`MenuNode::group`] and carries `children`, even
/// when the list is empty; a leaf has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Stable identifier, unique within the tree.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Path prefix this entry navigates to and is active under.
    pub route_prefix: String,
    /// Capability needed to see the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Capability>,
    /// Sub-entries; `None` for a leaf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuNode>>,
}

impl MenuNode {
    /// A leaf entry.
    pub fn item(key: &str, label: &str, route_prefix: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            route_prefix: route_prefix.to_string(),
            required: None,
            children: None,
        }
    }

    /// A group entry.
    pub fn group(key: &str, label: &str, route_prefix: &str, children: Vec<MenuNode>) -> Self {
        Self {
            children: Some(children),
            ..Self::item(key, label, route_prefix)
        }
    }

    /// Attach a required capability.
    pub fn requires(mut self, capability: impl Into<Capability>) -> Self {
        self.required = Some(capability.into());
        self
    }

    /// Whether this node was declared as a group.
    pub fn is_group(&self) -> bool {
        self.children.is_some()
    }

    /// Sub-entries, empty for a leaf.
    pub fn child_nodes(&self) -> &[MenuNode] {
        self.children.as_deref().unwrap_or_default()
    }

    fn is_visible_to(&self, evaluator: &PermissionEvaluator<'_>) -> bool {
        self.required
            .as_ref()
            .is_none_or(|capability| evaluator.has_permission(capability))
    }
}

/// Prune `menu` to what the evaluated user may see.
///
/// Leaves are kept when their requirement passes or they have none. Groups
/// must pass their own requirement and keep at least one child. The input
/// is not modified.
pub fn build_menu(menu: &[MenuNode], evaluator: &PermissionEvaluator<'_>) -> Vec<MenuNode> {
    menu.iter()
        .filter_map(|node| filter_node(node, evaluator))
        .collect()
}

fn filter_node(node: &MenuNode, evaluator: &PermissionEvaluator<'_>) -> Option<MenuNode> {
    if !node.is_visible_to(evaluator) {
        return None;
    }

    let Some(children) = &node.children else {
        return Some(node.clone());
    };

    let children = build_menu(children, evaluator);
    if children.is_empty() {
        return None;
    }

    Some(MenuNode {
        children: Some(children),
        ..node.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_entity::user::{UserProfile, UserRole};

    fn menu() -> Vec<MenuNode> {
        vec![
            MenuNode::item("dashboard", "Dashboard", "/admin"),
            MenuNode::group(
                "catalog",
                "Catalog",
                "/admin/catalog",
                vec![
                    MenuNode::item("products", "Products", "/admin/catalog/products")
                        .requires("read_products"),
                    MenuNode::item("categories", "Categories", "/admin/catalog/categories")
                        .requires("read_categories"),
                ],
            ),
            MenuNode::group(
                "people",
                "People",
                "/admin/people",
                vec![
                    MenuNode::item("users", "Users", "/admin/people/users").requires("read_users"),
                ],
            ),
        ]
    }

    fn keys(nodes: &[MenuNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.key.as_str()).collect()
    }

    #[test]
    fn test_leaves_filtered_and_empty_groups_dropped() {
        let user = UserProfile::new("s", UserRole::Staff, ["read_products"]);
        let visible = build_menu(&menu(), &PermissionEvaluator::new(Some(&user)));

        assert_eq!(keys(&visible), ["dashboard", "catalog"]);
        assert_eq!(keys(visible[1].child_nodes()), ["products"]);
    }

    #[test]
    fn test_admin_sees_everything() {
        let admin = UserProfile::new("a", UserRole::Admin, Vec::<String>::new());
        let visible = build_menu(&menu(), &PermissionEvaluator::new(Some(&admin)));
        assert_eq!(visible, menu());
    }

    #[test]
    fn test_anonymous_sees_only_unrestricted_leaves() {
        let visible = build_menu(&menu(), &PermissionEvaluator::anonymous());
        assert_eq!(keys(&visible), ["dashboard"]);
    }

    #[test]
    fn test_group_requirement_applies() {
        let tree = vec![
            MenuNode::group(
                "settings",
                "Settings",
                "/admin/settings",
                vec![MenuNode::item("general", "General", "/admin/settings/general")],
            )
            .requires("manage_settings"),
        ];
        let user = UserProfile::new("s", UserRole::Staff, ["read_products"]);
        assert!(build_menu(&tree, &PermissionEvaluator::new(Some(&user))).is_empty());
    }

    #[test]
    fn test_group_survives_with_single_child() {
        let user = UserProfile::new("p", UserRole::Pharmacist, ["read_users"]);
        let visible = build_menu(&menu(), &PermissionEvaluator::new(Some(&user)));

        assert_eq!(keys(&visible), ["dashboard", "people"]);
        assert_eq!(keys(visible[1].child_nodes()), ["users"]);
    }

    #[test]
    fn test_group_declared_without_children_is_dropped() {
        let tree = vec![
            MenuNode::item("dashboard", "Dashboard", "/admin"),
            MenuNode::group("reports", "Reports", "/admin/reports", vec![]),
        ];
        let admin = UserProfile::new("a", UserRole::Admin, Vec::<String>::new());
        let staff = UserProfile::new("s", UserRole::Staff, ["read_reports"]);

        for user in [&admin, &staff] {
            let visible = build_menu(&tree, &PermissionEvaluator::new(Some(user)));
            assert_eq!(keys(&visible), ["dashboard"]);
        }
        assert!(!tree[0].is_group());
        assert!(tree[1].is_group());
    }
}
