//! Server-side session flows.

pub mod service;

pub use service::{AuthService, LoginResult};
