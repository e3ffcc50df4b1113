//! User store trait and its implementations.

pub mod memory;
pub mod user;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use pharmacy_core::config::{DatabaseConfig, DatabaseProvider};
use pharmacy_core::result::AppResult;
use pharmacy_entity::user::model::{CreateUser, UpdateUserAccess};
use pharmacy_entity::user::{User, UserRole, UserStatus};

pub use memory::MemoryUserStore;
pub use user::UserRepository;

/// Persistence operations on console accounts.
///
/// Lookups return `Ok(None)` for a missing row; mutations of a missing row
/// fail with `NotFound`, and creating a duplicate email fails with `Conflict`.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List users, newest first, optionally restricted to one role.
    async fn list(&self, role: Option<UserRole>) -> AppResult<Vec<User>>;

    /// Insert a new active user.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Replace a user's role and grants.
    async fn update_access(&self, data: UpdateUserAccess) -> AppResult<User>;

    /// Change a user's account status.
    async fn update_status(&self, id: Uuid, status: UserStatus) -> AppResult<User>;

    /// Record a successful login.
    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;
}

/// Open the user store selected by configuration.
///
/// For PostgreSQL this connects the pool and runs pending migrations.
pub async fn open_user_store(config: &DatabaseConfig) -> AppResult<Arc<dyn UserStore>> {
    match config.provider {
        DatabaseProvider::Postgres => {
            let pool = crate::connection::connect(config).await?;
            crate::migration::run_migrations(&pool).await?;
            Ok(Arc::new(UserRepository::new(pool)))
        }
        DatabaseProvider::Memory => {
            info!("Using in-memory user store; accounts are lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}
