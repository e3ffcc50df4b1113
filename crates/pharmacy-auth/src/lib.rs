//! # pharmacy-auth
//!
//! Authentication and authorization for the pharmacy console.
//!
//! ## Modules
//!
//! - `jwt`: bearer token issuance, validation, and revocation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `rbac`: the permission evaluator and per-role default grants
//! - `guard`: route guard decisions shared by the API and the console
//! - `navigation`: permission-filtered menu building and active-route matching
//! - `session`: login, who-am-I, and logout
//! - `accounts`: staff account provisioning

pub mod accounts;
pub mod guard;
pub mod jwt;
pub mod navigation;
pub mod password;
pub mod rbac;
pub mod session;

pub use accounts::AccountService;
pub use guard::{GuardDecision, Requirement, SessionState};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use navigation::{MenuNode, active_trail, build_menu, console_menu};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{PermissionEvaluator, RolePolicies};
pub use session::AuthService;
