//! Route guards and navigation over HTTP.

mod common;

use http::StatusCode;
use serde_json::json;

use common::TestApp;
use pharmacy_entity::user::UserRole;

#[tokio::test]
async fn test_guarded_route_without_token_is_401() {
    let app = TestApp::new();
    let res = app.request("GET", "/api/admin/users", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.request("GET", "/api/navigation", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_capability_is_403() {
    let app = TestApp::new();
    let token = app
        .token_for("sam@pharmacy.local", UserRole::Staff, &["read_products"])
        .await;

    let res = app.request("GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_each_method_has_its_own_capability() {
    let app = TestApp::new();
    let token = app
        .token_for("rita@pharmacy.local", UserRole::Manager, &["read_users"])
        .await;

    let res = app.request("GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"].as_array().map(Vec::len), Some(1));

    let res = app
        .request(
            "POST",
            "/api/admin/users",
            Some(&token),
            Some(json!({
                "name": "New",
                "email": "new@pharmacy.local",
                "password": "Sturdy#Pharmacy42",
                "role": "staff"
            })),
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_passes_every_guard() {
    let app = TestApp::new();
    let token = app.token_for("root@pharmacy.local", UserRole::Admin, &[]).await;
    let target = app.seed("old@pharmacy.local", UserRole::Staff, &[]).await;

    let res = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{}", target.id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["status"], "inactive");
}

#[tokio::test]
async fn test_permission_change_applies_to_existing_token() {
    let app = TestApp::new();
    let admin = app.token_for("root@pharmacy.local", UserRole::Admin, &[]).await;
    let staff_token = app
        .token_for("sam@pharmacy.local", UserRole::Staff, &["read_products"])
        .await;

    let res = app.request("GET", "/api/admin/users", Some(&staff_token), None).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let staff_id = app
        .request("GET", "/api/auth/me", Some(&staff_token), None)
        .await
        .body["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let res = app
        .request(
            "PUT",
            &format!("/api/admin/users/{staff_id}/access"),
            Some(&admin),
            Some(json!({ "role": "staff", "permissions": ["read_products", "read_users"] })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.request("GET", "/api/admin/users", Some(&staff_token), None).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_manager_cannot_create_admin() {
    let app = TestApp::new();
    let token = app
        .token_for("rita@pharmacy.local", UserRole::Manager, &["write_users"])
        .await;

    let res = app
        .request(
            "POST",
            "/api/admin/users",
            Some(&token),
            Some(json!({
                "name": "Boss",
                "email": "boss@pharmacy.local",
                "password": "Sturdy#Pharmacy42",
                "role": "admin"
            })),
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_navigation_is_filtered_with_active_trail() {
    let app = TestApp::new();
    let token = app
        .token_for("sam@pharmacy.local", UserRole::Staff, &["read_products"])
        .await;

    let res = app
        .request(
            "GET",
            "/api/navigation?location=/admin/catalog/products/42",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let keys: Vec<&str> = res.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["dashboard", "catalog"]);
    assert_eq!(res.body["data"]["active"], json!(["catalog", "products"]));
}

#[tokio::test]
async fn test_manager_cannot_deactivate_admin() {
    let app = TestApp::new();
    let token = app
        .token_for("rita@pharmacy.local", UserRole::Manager, &["delete_users"])
        .await;
    let admin = app.seed("root@pharmacy.local", UserRole::Admin, &[]).await;

    let res = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{}", admin.id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "root@pharmacy.local", "password": common::PASSWORD })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
}
