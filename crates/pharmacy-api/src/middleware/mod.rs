//! HTTP middleware.

pub mod cors;
pub mod guard;
pub mod logging;
