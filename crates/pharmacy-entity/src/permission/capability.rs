//! Capability names.
//!
//! A capability is a plain string such as `write_orders`. The console
//! forms resource capabilities as `<action>_<resource>`; any other string
//! is still a valid capability and is matched literally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named permission gating one action on one resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// Wrap an arbitrary capability name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The capability for `action` on `resource`, e.g. `read_products`.
    pub fn for_resource(action: Action, resource: Resource) -> Self {
        Self(format!("{}{}", action.prefix(), resource.as_str()))
    }

    /// Return the capability name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Capability {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The verb half of a resource capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// List and view.
    Read,
    /// Create and edit.
    Write,
    /// Remove.
    Delete,
    /// Administrative control (assign, configure).
    Manage,
}

impl Action {
    /// Every action.
    pub const ALL: [Action; 4] = [Self::Read, Self::Write, Self::Delete, Self::Manage];

    /// The fixed prefix joined to a resource name.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Read => "read_",
            Self::Write => "write_",
            Self::Delete => "delete_",
            Self::Manage => "manage_",
        }
    }
}

/// Console resources that carry capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Dashboard widgets and statistics.
    Dashboard,
    /// Product catalog.
    Products,
    /// Product categories.
    Categories,
    /// Stock levels and inventory transactions.
    Inventory,
    /// Suppliers.
    Suppliers,
    /// Goods receipts from suppliers.
    GoodsReceipts,
    /// Customer orders.
    Orders,
    /// Storefront customers.
    Customers,
    /// Console user accounts.
    Users,
    /// Staff records.
    Staff,
    /// Store settings.
    Settings,
    /// Sales and stock reports.
    Reports,
}

impl Resource {
    /// Every resource.
    pub const ALL: [Resource; 12] = [
        Self::Dashboard,
        Self::Products,
        Self::Categories,
        Self::Inventory,
        Self::Suppliers,
        Self::GoodsReceipts,
        Self::Orders,
        Self::Customers,
        Self::Users,
        Self::Staff,
        Self::Settings,
        Self::Reports,
    ];

    /// Return the resource name used in capabilities.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Inventory => "inventory",
            Self::Suppliers => "suppliers",
            Self::GoodsReceipts => "goods_receipts",
            Self::Orders => "orders",
            Self::Customers => "customers",
            Self::Users => "users",
            Self::Staff => "staff",
            Self::Settings => "settings",
            Self::Reports => "reports",
        }
    }

    /// Shorthand for [`Capability::for_resource`].
    pub fn capability(self, action: Action) -> Capability {
        Capability::for_resource(action, self)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = pharmacy_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| pharmacy_core::AppError::validation(format!("Unknown resource: '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_capability_names() {
        assert_eq!(
            Capability::for_resource(Action::Read, Resource::Products).as_str(),
            "read_products"
        );
        assert_eq!(
            Resource::GoodsReceipts.capability(Action::Write).as_str(),
            "write_goods_receipts"
        );
        assert_eq!(Resource::Users.capability(Action::Manage).to_string(), "manage_users");
    }

    #[test]
    fn test_resource_from_str() {
        assert_eq!("goods_receipts".parse::<Resource>().unwrap(), Resource::GoodsReceipts);
        assert!("warehouses".parse::<Resource>().is_err());
    }

    #[test]
    fn test_capability_serializes_as_plain_string() {
        let cap = Capability::new("write_orders");
        assert_eq!(serde_json::to_string(&cap).unwrap(), "\"write_orders\"");
    }
}
