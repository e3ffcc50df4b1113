//! Permission-filtered navigation.
//!
//! The console menu is a static tree. [`build_menu`] prunes it for the
//! current user and [`active_trail`] selects the entry matching the current
//! location. Both are recomputed whenever their inputs change.

pub mod console;
pub mod matcher;
pub mod menu;

pub use console::console_menu;
pub use matcher::{active_trail, normalize_location, prefix_matches};
pub use menu::{MenuNode, build_menu};
