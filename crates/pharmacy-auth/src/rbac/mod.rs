//! Role-based access control: capability predicates and role defaults.

pub mod evaluator;
pub mod policies;

pub use evaluator::{PermissionEvaluator, has_all_permissions, has_any_permission, has_permission};
pub use policies::RolePolicies;
