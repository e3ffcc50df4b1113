//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use pharmacy_auth::navigation::{MenuNode, console_menu};
use pharmacy_auth::{AccountService, AuthService};
use pharmacy_core::config::AppConfig;
use pharmacy_database::UserStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Account persistence
    pub users: Arc<dyn UserStore>,
    /// Login, who-am-I, logout
    pub auth: Arc<AuthService>,
    /// Staff provisioning
    pub accounts: Arc<AccountService>,
    /// Unfiltered navigation tree
    pub menu: Arc<Vec<MenuNode>>,
}

impl AppState {
    /// Wire the services over a user store.
    pub fn new(config: AppConfig, users: Arc<dyn UserStore>) -> Self {
        let auth = Arc::new(AuthService::new(Arc::clone(&users), &config.auth));
        let accounts = Arc::new(AccountService::new(Arc::clone(&users), &config.auth));

        Self {
            config: Arc::new(config),
            users,
            auth,
            accounts,
            menu: Arc::new(console_menu()),
        }
    }
}
