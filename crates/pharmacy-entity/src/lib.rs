//! # pharmacy-entity
//!
//! Domain entity models for the pharmacy console. Every struct in this
//! crate represents a database row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod permission;
pub mod user;
