mod common;

use axum::http::StatusCode;
use common::{TestApp, TEST_PASSWORD};
use praetor_backend::domain::models::user::Role;
use serde_json::json;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.request("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let app = TestApp::new().await;

    let (status, body) = app.request("GET", "/api/clients", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app.request("GET", "/api/clients", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_of_deleted_user_is_unauthenticated() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;
    let (victim, victim_token) = app.seed_user("Vic Tim", "vic", Role::User).await;

    let (status, _) = app.request("DELETE", &format!("/api/users/{}", victim.id), Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request("GET", "/api/auth/me", Some(&victim_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_issues_token_for_valid_credentials() {
    let app = TestApp::new().await;
    app.seed_user("Lou Login", "lou", Role::Manager).await;

    let (status, _) = app
        .request("POST", "/api/auth/login", None, Some(json!({"username": "lou", "password": "wrong"})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request("POST", "/api/auth/login", None, Some(json!({"username": "lou", "password": TEST_PASSWORD})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "lou");
    assert_eq!(body["user"]["avatarInitials"], "LL");
    assert!(body["user"].get("passwordHash").is_none());

    let token = body["token"].as_str().unwrap();
    let (status, me) = app.request("GET", "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "manager");
}

#[tokio::test]
async fn role_changes_apply_to_existing_tokens() {
    let app = TestApp::new().await;
    let (manager, token) = app.seed_user("Max Manager", "max", Role::Manager).await;

    let (status, _) = app.request("GET", "/api/quotes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    app.state.user_repo.update_profile(&manager.id, &manager.name, Role::User).await.unwrap();

    let (status, body) = app.request("GET", "/api/quotes", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Insufficient permissions");
}

#[tokio::test]
async fn malformed_json_answers_with_error_body() {
    let app = TestApp::new().await;
    let (_admin, token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;

    let (status, body) = app
        .request("POST", "/api/clients", Some(&token), Some(json!({"name": 42})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
