//! Staff account provisioning and access management.

pub mod service;

pub use service::{AccountService, NewAccount};
