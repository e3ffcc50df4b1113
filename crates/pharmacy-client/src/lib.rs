//! # pharmacy-client
//!
//! The console runtime: everything the admin console needs to decide what
//! to show for a location.
//!
//! - `storage`: persisted key/value storage (token, flash message)
//! - `api`: the authentication endpoints over HTTP
//! - `navigator`: location history with push, replace, and back
//! - `session`: the session resolver and its observable state
//! - `views`: guarded rendering of a view for the current session
//! - `routes`: the console route table
//! - `console`: ties the above together to open a location

pub mod api;
pub mod console;
pub mod navigator;
pub mod routes;
pub mod session;
pub mod storage;
pub mod views;

pub use api::{AuthApi, HttpAuthApi};
pub use console::{Console, Page};
pub use navigator::{HistoryNavigator, Navigator};
pub use session::SessionContext;
pub use storage::{ClientStorage, FileStorage, MemoryStorage};
pub use views::{ForbiddenView, GuardedView, RouteGuard};
