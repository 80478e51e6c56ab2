mod common;

use axum::http::StatusCode;
use common::TestApp;
use praetor_backend::domain::models::user::Role;
use serde_json::{json, Value};

async fn create_client(app: &TestApp, token: &str, name: &str) -> String {
    let (status, body) = app.request("POST", "/api/clients", Some(token), Some(json!({"name": name}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

fn ids(body: &Value, key: &str) -> Vec<String> {
    let mut ids: Vec<String> = body[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn replacing_twice_with_same_set_is_idempotent() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;
    let (user, _) = app.seed_user("Uma User", "uma", Role::User).await;
    let c1 = create_client(&app, &admin_token, "Acme").await;
    let c2 = create_client(&app, &admin_token, "Globex").await;

    let uri = format!("/api/users/{}/assignments", user.id);
    // Duplicates in the input collapse into one row.
    let body = json!({"clientIds": [c1, c2, c1]});
    for _ in 0..2 {
        let (status, _) = app.request("POST", &uri, Some(&admin_token), Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, assignments) = app.request("GET", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = vec![c1.clone(), c2.clone()];
    expected.sort();
    assert_eq!(ids(&assignments, "clientIds"), expected);
    assert_eq!(
        app.count(&format!("SELECT COUNT(*) FROM user_clients WHERE user_id = '{}'", user.id)).await,
        2
    );
}

#[tokio::test]
async fn failed_replace_leaves_previous_sets_untouched() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;
    let (user, _) = app.seed_user("Uma User", "uma", Role::User).await;
    let c1 = create_client(&app, &admin_token, "Acme").await;
    let c2 = create_client(&app, &admin_token, "Globex").await;

    let uri = format!("/api/users/{}/assignments", user.id);
    let (status, _) = app.request("POST", &uri, Some(&admin_token), Some(json!({"clientIds": [c1]}))).await;
    assert_eq!(status, StatusCode::OK);

    // The unknown id fails after the client set was already rewritten inside the transaction.
    let (status, body) = app
        .request("POST", &uri, Some(&admin_token), Some(json!({"clientIds": [c2], "projectIds": ["missing-project"]})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("missing-project"));

    let (_, assignments) = app.request("GET", &uri, Some(&admin_token), None).await;
    assert_eq!(ids(&assignments, "clientIds"), vec![c1]);
    assert!(ids(&assignments, "projectIds").is_empty());
}

#[tokio::test]
async fn omitted_lists_are_left_alone_and_empty_lists_clear() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;
    let (user, _) = app.seed_user("Uma User", "uma", Role::User).await;
    let c1 = create_client(&app, &admin_token, "Acme").await;
    let (_, project) = app
        .request("POST", "/api/projects", Some(&admin_token), Some(json!({"name": "Portal", "clientId": c1})))
        .await;
    let p1 = project["id"].as_str().unwrap().to_string();

    let uri = format!("/api/users/{}/assignments", user.id);
    app.request("POST", &uri, Some(&admin_token), Some(json!({"clientIds": [c1], "projectIds": [p1]}))).await;
    app.request("POST", &uri, Some(&admin_token), Some(json!({"clientIds": []}))).await;

    let (_, assignments) = app.request("GET", &uri, Some(&admin_token), None).await;
    assert!(ids(&assignments, "clientIds").is_empty());
    assert_eq!(ids(&assignments, "projectIds"), vec![p1]);
}

#[tokio::test]
async fn user_only_lists_assigned_clients() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;
    let (user, user_token) = app.seed_user("Uma User", "uma", Role::User).await;
    let (_manager, manager_token) = app.seed_user("Max Manager", "max", Role::Manager).await;
    let c1 = create_client(&app, &admin_token, "Acme").await;
    let _c2 = create_client(&app, &admin_token, "Globex").await;

    app.request(
        "POST",
        &format!("/api/users/{}/assignments", user.id),
        Some(&manager_token),
        Some(json!({"clientIds": [c1]})),
    )
    .await;

    let (status, clients) = app.request("GET", "/api/clients", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let clients = clients.as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["id"], c1.as_str());

    let (_, all) = app.request("GET", "/api/clients", Some(&manager_token), None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn assignment_access_rules() {
    let app = TestApp::new().await;
    let (user, user_token) = app.seed_user("Uma User", "uma", Role::User).await;
    let (other, _) = app.seed_user("Oto Other", "oto", Role::User).await;
    let (_manager, manager_token) = app.seed_user("Max Manager", "max", Role::Manager).await;

    let (status, own) = app
        .request("GET", &format!("/api/users/{}/assignments", user.id), Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own, json!({"clientIds": [], "projectIds": [], "taskIds": []}));

    let (status, _) = app
        .request("GET", &format!("/api/users/{}/assignments", other.id), Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request("POST", &format!("/api/users/{}/assignments", user.id), Some(&user_token), Some(json!({"clientIds": []})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request("POST", "/api/users/nobody/assignments", Some(&manager_token), Some(json!({"clientIds": []})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
