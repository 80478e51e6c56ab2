mod common;

use axum::http::StatusCode;
use common::TestApp;
use praetor_backend::domain::models::user::Role;
use serde_json::json;

/// Creates client, project and task as `token`; returns the task id.
async fn create_task(app: &TestApp, token: &str, name: &str) -> String {
    let (_, client) = app.request("POST", "/api/clients", Some(token), Some(json!({"name": "Acme"}))).await;
    let (_, project) = app
        .request("POST", "/api/projects", Some(token), Some(json!({"name": "Portal", "clientId": client["id"]})))
        .await;
    let (status, task) = app
        .request("POST", "/api/tasks", Some(token), Some(json!({"name": name, "projectId": project["id"]})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    task["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn user_cannot_modify_unassigned_task() {
    let app = TestApp::new().await;
    let (_manager, manager_token) = app.seed_user("Max Manager", "max", Role::Manager).await;
    let (_user, user_token) = app.seed_user("Uma User", "uma", Role::User).await;
    let task_id = create_task(&app, &manager_token, "Secret").await;

    let (_, listed) = app.request("GET", "/api/tasks", Some(&user_token), None).await;
    assert_eq!(listed, json!([]));

    let uri = format!("/api/tasks/{task_id}");
    let (status, body) = app.request("PUT", &uri, Some(&user_token), Some(json!({"name": "Hijacked"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");

    let (status, _) = app.request("DELETE", &uri, Some(&user_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Unknown ids look the same as unassigned ones.
    let (status, _) = app.request("DELETE", "/api/tasks/ghost", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(app.count("SELECT COUNT(*) FROM tasks WHERE name = 'Secret'").await, 1);
}

#[tokio::test]
async fn user_can_modify_assigned_task() {
    let app = TestApp::new().await;
    let (_manager, manager_token) = app.seed_user("Max Manager", "max", Role::Manager).await;
    let (user, user_token) = app.seed_user("Uma User", "uma", Role::User).await;
    let task_id = create_task(&app, &manager_token, "Design").await;

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/users/{}/assignments", user.id),
            Some(&manager_token),
            Some(json!({"taskIds": [task_id]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/tasks/{task_id}");
    let (status, updated) = app.request("PUT", &uri, Some(&user_token), Some(json!({"name": "Design v2"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Design v2");

    let (status, body) = app.request("DELETE", &uri, Some(&user_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted");
    assert_eq!(app.count("SELECT COUNT(*) FROM tasks").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM user_tasks").await, 0);
}

#[tokio::test]
async fn managers_modify_any_task() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;
    let (_manager, manager_token) = app.seed_user("Max Manager", "max", Role::Manager).await;
    let task_id = create_task(&app, &admin_token, "Review").await;

    let (status, _) = app
        .request("PUT", &format!("/api/tasks/{task_id}"), Some(&manager_token), Some(json!({"description": "Q3"})))
        .await;
    assert_eq!(status, StatusCode::OK);

    // Managers are not scope-limited, so a missing id is a plain 404.
    let (status, _) = app.request("DELETE", "/api/tasks/ghost", Some(&manager_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
