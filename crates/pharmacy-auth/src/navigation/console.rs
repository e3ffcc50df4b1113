//! The admin console menu.

use pharmacy_entity::permission::{Action, Resource};

use super::menu::MenuNode;

/// The full, unfiltered console menu.
pub fn console_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::item("dashboard", "Dashboard", "/admin"),
        MenuNode::group(
            "catalog",
            "Catalog",
            "/admin/catalog",
            vec![
                leaf("products", "Products", "/admin/catalog/products", Resource::Products),
                leaf(
                    "categories",
                    "Categories",
                    "/admin/catalog/categories",
                    Resource::Categories,
                ),
            ],
        ),
        MenuNode::group(
            "inventory",
            "Inventory",
            "/admin/inventory",
            vec![
                leaf("stock", "Stock", "/admin/inventory/stock", Resource::Inventory),
                leaf(
                    "goods_receipts",
                    "Goods receipts",
                    "/admin/inventory/receipts",
                    Resource::GoodsReceipts,
                ),
                leaf(
                    "suppliers",
                    "Suppliers",
                    "/admin/inventory/suppliers",
                    Resource::Suppliers,
                ),
            ],
        ),
        MenuNode::group(
            "sales",
            "Sales",
            "/admin/sales",
            vec![
                leaf("orders", "Orders", "/admin/sales/orders", Resource::Orders),
                leaf(
                    "customers",
                    "Customers",
                    "/admin/sales/customers",
                    Resource::Customers,
                ),
            ],
        ),
        leaf("reports", "Reports", "/admin/reports", Resource::Reports),
        MenuNode::group(
            "people",
            "People",
            "/admin/people",
            vec![
                leaf("users", "Users", "/admin/people/users", Resource::Users),
                leaf("staff", "Staff", "/admin/people/staff", Resource::Staff),
            ],
        ),
        MenuNode::item("settings", "Settings", "/admin/settings")
            .requires(Resource::Settings.capability(Action::Manage)),
    ]
}

fn leaf(key: &str, label: &str, prefix: &str, resource: Resource) -> MenuNode {
    MenuNode::item(key, label, prefix).requires(resource.capability(Action::Read))
}
