//! A user's explicit capability grants.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::capability::Capability;

/// Set of capability names; membership is literal string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `capability` was granted.
    pub fn contains(&self, capability: &str) -> bool {
        self.0.contains(capability)
    }

    /// Grant a capability. Returns `false` if it was already present.
    pub fn insert(&mut self, capability: impl Into<String>) -> bool {
        self.0.insert(capability.into())
    }

    /// Revoke a capability. Returns `false` if it was not present.
    pub fn remove(&mut self, capability: &str) -> bool {
        self.0.remove(capability)
    }

    /// Number of grants.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over grant names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Grants as an owned list, the storage representation.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl FromIterator<String> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl FromIterator<Capability> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self(iter.into_iter().map(|c| c.as_str().to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_is_literal() {
        let set: PermissionSet = ["read_products", "write_orders"].into_iter().collect();
        assert!(set.contains("read_products"));
        assert!(!set.contains("READ_PRODUCTS"));
        assert!(!set.contains("read_product"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set: PermissionSet = ["read_orders", "read_orders"].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_eq!(set.to_vec(), vec!["read_orders".to_string()]);
    }
}
