//! The authentication endpoints, as the console calls them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use pharmacy_auth::navigation::MenuNode;
use pharmacy_auth::session::LoginResult;
use pharmacy_core::config::ClientConfig;
use pharmacy_core::error::AppError;
use pharmacy_core::result::AppResult;
use pharmacy_entity::user::UserProfile;

/// Server calls the session resolver depends on.
///
/// A rejected credential or token (HTTP 401/403) is an authentication
/// error; an unreachable or misbehaving server is an external-service
/// error.
#[async_trait]
pub trait AuthApi: Send + Sync + std::fmt::Debug {
    /// `POST /api/auth/login`
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult>;

    /// `GET /api/auth/me`
    async fn me(&self, token: &str) -> AppResult<UserProfile>;

    /// `POST /api/auth/logout`
    async fn logout(&self, token: &str) -> AppResult<()>;
}

/// Success envelope used by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body used by every endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Menu as served by `GET /api/navigation`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteNavigation {
    /// Visible entries.
    pub items: Vec<MenuNode>,
    /// Active trail.
    pub active: Vec<String>,
}

/// [`AuthApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    /// `GET /api/navigation` for the given location.
    pub async fn navigation(&self, token: &str, location: &str) -> AppResult<RemoteNavigation> {
        let url = Url::parse_with_params(&self.url("/navigation"), [("location", location)])
            .map_err(|e| AppError::configuration(format!("Invalid API base URL: {e}")))?;
        send(self.client.get(url).bearer_auth(token)).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> AppResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| AppError::external_service(format!("API unreachable: {e}")))?;

    let status = response.status();
    if status.is_success() {
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Unexpected API response: {e}")))?;
        return Ok(envelope.data);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|b| b.message)
        .unwrap_or_else(|_| status.to_string());
    debug!(status = status.as_u16(), message = %message, "API call rejected");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::authentication(message)),
        _ => Err(AppError::external_service(format!("API error {status}: {message}"))),
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        send(request).await
    }

    async fn me(&self, token: &str) -> AppResult<UserProfile> {
        send(self.client.get(self.url("/auth/me")).bearer_auth(token)).await
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        let _: serde_json::Value =
            send(self.client.post(self.url("/auth/logout")).bearer_auth(token)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_api_prefix() {
        let config = ClientConfig {
            api_base_url: "http://pharmacy.test:9000/".into(),
            ..ClientConfig::default()
        };
        let api = HttpAuthApi::new(&config).unwrap();
        assert_eq!(api.url("/auth/me"), "http://pharmacy.test:9000/api/auth/me");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_external_service_error() {
        let config = ClientConfig {
            // Port 9 (discard) on loopback refuses connections.
            api_base_url: "http://127.0.0.1:9".into(),
            request_timeout_seconds: 2,
            ..ClientConfig::default()
        };
        let api = HttpAuthApi::new(&config).unwrap();

        let err = api.me("token").await.unwrap_err();
        assert_eq!(err.kind, pharmacy_core::ErrorKind::ExternalService);
    }
}
