//! User domain entities.

pub mod model;
pub mod profile;
pub mod role;
pub mod status;

pub use model::User;
pub use profile::UserProfile;
pub use role::UserRole;
pub use status::UserStatus;
