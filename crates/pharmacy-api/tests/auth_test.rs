//! Login, who-am-I, and logout over HTTP.

mod common;

use http::StatusCode;
use serde_json::json;

use common::{PASSWORD, TestApp};
use pharmacy_entity::user::UserRole;

#[tokio::test]
async fn test_login_returns_token_and_profile() {
    let app = TestApp::new();
    app.seed("sam@pharmacy.local", UserRole::Staff, &["read_products"]).await;

    let res = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "sam@pharmacy.local", "password": PASSWORD })),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert!(res.body["data"]["token"].is_string());
    assert_eq!(res.body["data"]["user"]["role"], "staff");
    assert_eq!(res.body["data"]["user"]["permissions"], json!(["read_products"]));
}

#[tokio::test]
async fn test_wrong_password_is_401() {
    let app = TestApp::new();
    app.seed("sam@pharmacy.local", UserRole::Staff, &[]).await;

    let res = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "sam@pharmacy.local", "password": "guess" })),
        )
        .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_requires_bearer_token() {
    let app = TestApp::new();
    let res = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.request("GET", "/api/auth/me", Some("garbage"), None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_then_logout_revokes() {
    let app = TestApp::new();
    let token = app
        .token_for("pat@pharmacy.local", UserRole::Pharmacist, &["read_inventory"])
        .await;

    let res = app.request("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["email"], "pat@pharmacy.local");

    let res = app.request("POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.request("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let res = app.request("GET", "/api/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["status"], "ok");
}
