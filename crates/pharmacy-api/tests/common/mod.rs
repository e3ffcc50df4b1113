//! Shared test helpers for API tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use pharmacy_api::{AppState, build_router};
use pharmacy_auth::PasswordHasher;
use pharmacy_core::config::{AppConfig, AuthConfig};
use pharmacy_database::UserStore;
use pharmacy_database::repositories::MemoryUserStore;
use pharmacy_entity::permission::PermissionSet;
use pharmacy_entity::user::model::CreateUser;
use pharmacy_entity::user::{User, UserRole};

pub const PASSWORD: &str = "Tablet$Counter91";

/// Router over an in-memory user store.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
}

/// Status plus parsed JSON body.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AppConfig {
            auth: AuthConfig {
                jwt_secret: "api-test-secret".into(),
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        };
        let users = Arc::new(MemoryUserStore::new());
        let state = AppState::new(config, users.clone());

        Self {
            router: build_router(state),
            users,
        }
    }

    /// Insert an account directly into the store.
    pub async fn seed(&self, email: &str, role: UserRole, permissions: &[&str]) -> User {
        self.users
            .create(CreateUser {
                name: email.split('@').next().unwrap_or(email).to_string(),
                email: email.to_string(),
                password_hash: PasswordHasher::new().hash_password(PASSWORD).unwrap(),
                role,
                permissions: permissions.iter().copied().collect::<PermissionSet>(),
            })
            .await
            .unwrap()
    }

    /// Seed an account and log it in, returning the bearer token.
    pub async fn token_for(&self, email: &str, role: UserRole, permissions: &[&str]) -> String {
        self.seed(email, role, permissions).await;
        let res = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{}", res.body);
        res.body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
