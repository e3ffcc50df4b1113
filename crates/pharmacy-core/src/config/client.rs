//! Console client configuration.

use serde::{Deserialize, Serialize};

/// Settings for the console client (session resolution and routing).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the pharmacy API, without the `/api` suffix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// File holding the persisted client storage (token, flash message).
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Timeout for API requests in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Route unauthenticated users are redirected to.
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Public entry point navigated to after logout.
    #[serde(default = "default_home_route")]
    pub home_route: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            storage_path: default_storage_path(),
            request_timeout_seconds: default_request_timeout(),
            login_route: default_login_route(),
            home_route: default_home_route(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_storage_path() -> String {
    ".pharmacy/session.json".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_home_route() -> String {
    "/".to_string()
}
