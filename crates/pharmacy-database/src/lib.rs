//! # pharmacy-database
//!
//! PostgreSQL connection management, migrations, and the user store
//! implementations (PostgreSQL and in-memory).

pub mod connection;
pub mod migration;
pub mod repositories;

pub use repositories::{UserStore, open_user_store};
