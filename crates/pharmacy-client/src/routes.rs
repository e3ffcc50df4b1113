//! The console route table.

use pharmacy_auth::guard::Requirement;
use pharmacy_auth::navigation::normalize_location;
use pharmacy_entity::permission::{Action, Resource};

/// Who may open a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Signed-in users meeting the requirement.
    Guarded(Requirement),
}

/// One console page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleRoute {
    /// Path pattern; `{name}` matches one segment.
    pub pattern: &'static str,
    /// Page title.
    pub title: &'static str,
    /// Access rule.
    pub access: Access,
}

impl ConsoleRoute {
    fn public(pattern: &'static str, title: &'static str) -> Self {
        Self {
            pattern,
            title,
            access: Access::Public,
        }
    }

    fn guarded(pattern: &'static str, title: &'static str, requirement: Requirement) -> Self {
        Self {
            pattern,
            title,
            access: Access::Guarded(requirement),
        }
    }

    /// Whether this route serves `location`.
    pub fn matches(&self, location: &str) -> bool {
        let mut pattern = self.pattern.split('/');
        let mut path = normalize_location(location).split('/');
        loop {
            match (pattern.next(), path.next()) {
                (None, None) => return true,
                (Some(p), Some(s)) if p.starts_with('{') && p.ends_with('}') && !s.is_empty() => {}
                (Some(p), Some(s)) if p == s => {}
                _ => return false,
            }
        }
    }
}

fn needs(action: Action, resource: Resource) -> Requirement {
    Requirement::one(resource.capability(action))
}

/// Every console page. Literal routes precede parameterized siblings.
pub fn console_routes() -> Vec<ConsoleRoute> {
    use Action::{Manage, Read, Write};
    use Resource::*;

    vec![
        ConsoleRoute::public("/", "Storefront"),
        ConsoleRoute::public("/login", "Sign in"),
        ConsoleRoute::guarded("/admin", "Dashboard", Requirement::none()),
        ConsoleRoute::guarded("/admin/catalog/products", "Products", needs(Read, Products)),
        ConsoleRoute::guarded("/admin/catalog/products/new", "New product", needs(Write, Products)),
        ConsoleRoute::guarded("/admin/catalog/products/{id}", "Product", needs(Read, Products)),
        ConsoleRoute::guarded(
            "/admin/catalog/products/{id}/edit",
            "Edit product",
            needs(Write, Products),
        ),
        ConsoleRoute::guarded("/admin/catalog/categories", "Categories", needs(Read, Categories)),
        ConsoleRoute::guarded("/admin/inventory/stock", "Stock", needs(Read, Inventory)),
        ConsoleRoute::guarded(
            "/admin/inventory/receipts",
            "Goods receipts",
            needs(Read, GoodsReceipts),
        ),
        ConsoleRoute::guarded(
            "/admin/inventory/receipts/new",
            "New goods receipt",
            needs(Write, GoodsReceipts),
        ),
        ConsoleRoute::guarded("/admin/inventory/suppliers", "Suppliers", needs(Read, Suppliers)),
        ConsoleRoute::guarded("/admin/sales/orders", "Orders", needs(Read, Orders)),
        ConsoleRoute::guarded("/admin/sales/orders/{id}", "Order", needs(Read, Orders)),
        ConsoleRoute::guarded("/admin/sales/customers", "Customers", needs(Read, Customers)),
        ConsoleRoute::guarded(
            "/admin/reports",
            "Reports",
            Requirement::all([
                Reports.capability(Read),
                Inventory.capability(Read),
            ]),
        ),
        ConsoleRoute::guarded("/admin/people/users", "Users", needs(Read, Users)),
        ConsoleRoute::guarded("/admin/people/users/new", "New user", needs(Write, Users)),
        ConsoleRoute::guarded(
            "/admin/people/staff",
            "Staff",
            Requirement::any([Staff.capability(Read), Users.capability(Manage)]),
        ),
        ConsoleRoute::guarded("/admin/settings", "Settings", needs(Manage, Settings)),
    ]
}

/// First route serving `location`.
pub fn match_route<'a>(routes: &'a [ConsoleRoute], location: &str) -> Option<&'a ConsoleRoute> {
    routes.iter().find(|r| r.matches(location))
}
