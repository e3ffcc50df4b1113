//! # pharmacy-api
//!
//! HTTP API layer for the pharmacy console built on Axum.
//!
//! Serves login, who-am-I, logout, the permission-filtered navigation menu,
//! and the staff management endpoints. Every protected route runs through
//! the same guard evaluation the console uses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
