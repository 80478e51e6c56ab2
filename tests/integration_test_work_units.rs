mod common;

use axum::http::StatusCode;
use common::TestApp;
use praetor_backend::domain::models::user::Role;
use serde_json::json;

#[tokio::test]
async fn only_admins_create_work_units() {
    let app = TestApp::new().await;
    let (manager, manager_token) = app.seed_user("Max Manager", "max", Role::Manager).await;
    let (_user, user_token) = app.seed_user("Uma User", "uma", Role::User).await;

    for token in [&manager_token, &user_token] {
        let (status, _) = app
            .request("POST", "/api/work-units", Some(token), Some(json!({"name": "Ops", "managerIds": [manager.id]})))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
    assert_eq!(app.count("SELECT COUNT(*) FROM work_units").await, 0);

    let (status, _) = app.request("GET", "/api/work-units", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn work_unit_requires_a_manager() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;

    let (status, body) = app
        .request("POST", "/api/work-units", Some(&admin_token), Some(json!({"name": "Ops", "managerIds": []})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "At least one manager is required");

    let (status, _) = app
        .request("POST", "/api/work-units", Some(&admin_token), Some(json!({"name": "Ops", "managerIds": ["ghost"]})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.count("SELECT COUNT(*) FROM work_units").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM work_unit_managers").await, 0);
}

#[tokio::test]
async fn managers_only_see_units_they_manage() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;
    let (max, max_token) = app.seed_user("Max Manager", "max", Role::Manager).await;
    let (mia, mia_token) = app.seed_user("Mia Manager", "mia", Role::Manager).await;

    let (status, ops) = app
        .request("POST", "/api/work-units", Some(&admin_token), Some(json!({"name": "Ops", "managerIds": [max.id]})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ops["managers"], json!([{"id": max.id, "name": "Max Manager"}]));
    assert_eq!(ops["userCount"], 0);
    assert_eq!(ops["isDisabled"], false);
    let ops_id = ops["id"].as_str().unwrap().to_string();

    app.request("POST", "/api/work-units", Some(&admin_token), Some(json!({"name": "Sales", "managerIds": [mia.id]})))
        .await;

    let (_, listed) = app.request("GET", "/api/work-units", Some(&max_token), None).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Ops");

    let (_, all) = app.request("GET", "/api/work-units", Some(&admin_token), None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, _) = app.request("GET", &format!("/api/work-units/{ops_id}"), Some(&max_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.request("GET", &format!("/api/work-units/{ops_id}"), Some(&mia_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
    let (status, _) = app.request("GET", &format!("/api/work-units/{ops_id}/users"), Some(&mia_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request("GET", "/api/work-units/missing", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A manager can't tell unknown units from ones they don't manage.
    let (status, body) = app.request("GET", "/api/work-units/missing/users", Some(&mia_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
    let (status, _) = app.request("GET", "/api/work-units/missing/users", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_patches_fields_and_replaces_managers() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;
    let (max, _) = app.seed_user("Max Manager", "max", Role::Manager).await;
    let (mia, _) = app.seed_user("Mia Manager", "mia", Role::Manager).await;

    let (_, unit) = app
        .request(
            "POST",
            "/api/work-units",
            Some(&admin_token),
            Some(json!({"name": "Ops", "description": "Operations", "managerIds": [max.id]})),
        )
        .await;
    let uri = format!("/api/work-units/{}", unit["id"].as_str().unwrap());

    let (status, _) = app.request("PUT", &uri, Some(&admin_token), Some(json!({"managerIds": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = app
        .request("PUT", &uri, Some(&admin_token), Some(json!({"isDisabled": true, "managerIds": [mia.id]})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ops");
    assert_eq!(updated["description"], "Operations");
    assert_eq!(updated["isDisabled"], true);
    assert_eq!(updated["managers"], json!([{"id": mia.id, "name": "Mia Manager"}]));

    let (status, _) = app
        .request("PUT", "/api/work-units/missing", Some(&admin_token), Some(json!({"name": "x"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn members_are_replaced_and_removed_with_the_unit() {
    let app = TestApp::new().await;
    let (_admin, admin_token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;
    let (max, max_token) = app.seed_user("Max Manager", "max", Role::Manager).await;
    let (u1, _) = app.seed_user("Uma User", "uma", Role::User).await;
    let (u2, _) = app.seed_user("Ugo User", "ugo", Role::User).await;

    let (_, unit) = app
        .request("POST", "/api/work-units", Some(&admin_token), Some(json!({"name": "Ops", "managerIds": [max.id]})))
        .await;
    let unit_id = unit["id"].as_str().unwrap().to_string();
    let users_uri = format!("/api/work-units/{unit_id}/users");

    let (status, _) = app.request("POST", &users_uri, Some(&admin_token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.request("POST", &users_uri, Some(&admin_token), Some(json!({"userIds": [u1.id, u2.id]}))).await;
    let (status, _) = app.request("POST", &users_uri, Some(&admin_token), Some(json!({"userIds": [u2.id]}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, members) = app.request("GET", &users_uri, Some(&max_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members, json!([u2.id]));

    let (_, view) = app.request("GET", &format!("/api/work-units/{unit_id}"), Some(&max_token), None).await;
    assert_eq!(view["userCount"], 1);

    let (status, body) = app.request("DELETE", &format!("/api/work-units/{unit_id}"), Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Work unit deleted");
    assert_eq!(app.count("SELECT COUNT(*) FROM work_unit_managers").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM user_work_units").await, 0);

    let (status, _) = app.request("GET", &users_uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
