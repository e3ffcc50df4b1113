//! Capability names and permission sets.

pub mod capability;
pub mod set;

pub use capability::{Action, Capability, Resource};
pub use set::PermissionSet;
