mod common;

use axum::http::StatusCode;
use common::TestApp;
use praetor_backend::domain::models::user::Role;
use serde_json::{json, Value};

fn quote_body(items: Value) -> Value {
    json!({
        "clientId": "c-1",
        "clientName": "Acme",
        "expirationDate": "2026-12-31",
        "items": items,
    })
}

#[tokio::test]
async fn quote_items_are_replaced_as_a_whole() {
    let app = TestApp::new().await;
    let (_manager, token) = app.seed_user("Max Manager", "max", Role::Manager).await;

    let items = json!([
        {"productName": "Widget", "quantity": 2, "unitPrice": 10},
        {"productName": "Gadget", "quantity": "1", "unitPrice": "5", "discount": 1},
    ]);
    let (status, quote) = app.request("POST", "/api/quotes", Some(&token), Some(quote_body(items))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(quote["paymentTerms"], "immediate");
    assert_eq!(quote["status"], "quoted");
    assert_eq!(quote["expirationDate"], "2026-12-31");
    assert_eq!(quote["items"][0]["productName"], "Widget");
    assert_eq!(quote["items"][1]["discount"], 1.0);
    let uri = format!("/api/quotes/{}", quote["id"].as_str().unwrap());

    let (status, updated) = app
        .request(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({"items": [{"productName": "Bolt", "quantity": 3, "unitPrice": 7}]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["clientName"], "Acme");
    assert_eq!(updated["items"].as_array().unwrap().len(), 1);
    assert_eq!(updated["items"][0]["quantity"], 3.0);
    assert_eq!(updated["items"][0]["unitPrice"], 7.0);
    assert_eq!(app.count("SELECT COUNT(*) FROM quote_items").await, 1);
}

#[tokio::test]
async fn header_only_update_keeps_items() {
    let app = TestApp::new().await;
    let (_manager, token) = app.seed_user("Max Manager", "max", Role::Manager).await;

    let items = json!([{"productName": "Widget", "quantity": 2, "unitPrice": 10}]);
    let (_, quote) = app.request("POST", "/api/quotes", Some(&token), Some(quote_body(items))).await;
    let uri = format!("/api/quotes/{}", quote["id"].as_str().unwrap());

    let (status, updated) = app
        .request("PUT", &uri, Some(&token), Some(json!({"status": "accepted", "notes": "signed"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "accepted");
    assert_eq!(updated["notes"], "signed");
    assert_eq!(updated["items"][0]["productName"], "Widget");
    assert!(updated["updatedAt"].as_i64().unwrap() >= quote["updatedAt"].as_i64().unwrap());

    let (status, _) = app.request("PUT", "/api/quotes/missing", Some(&token), Some(json!({"status": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_items_write_nothing() {
    let app = TestApp::new().await;
    let (_manager, token) = app.seed_user("Max Manager", "max", Role::Manager).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/quotes",
            Some(&token),
            Some(quote_body(json!([{"productName": "Widget", "quantity": 0, "unitPrice": 10}]))),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "items[0].quantity must be greater than 0");

    let (status, _) = app
        .request(
            "POST",
            "/api/quotes",
            Some(&token),
            Some(quote_body(json!([{"productName": "Widget", "quantity": 1, "unitPrice": -1}]))),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("POST", "/api/quotes", Some(&token), Some(quote_body(json!([])))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.count("SELECT COUNT(*) FROM quotes").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM quote_items").await, 0);
}

#[tokio::test]
async fn deleting_a_quote_unlinks_its_sales() {
    let app = TestApp::new().await;
    let (_manager, token) = app.seed_user("Max Manager", "max", Role::Manager).await;

    let items = json!([{"productName": "Widget", "quantity": 1, "unitPrice": 10}]);
    let (_, quote) = app.request("POST", "/api/quotes", Some(&token), Some(quote_body(items.clone()))).await;
    let quote_id = quote["id"].as_str().unwrap().to_string();

    let (status, sale) = app
        .request(
            "POST",
            "/api/sales",
            Some(&token),
            Some(json!({"linkedQuoteId": quote_id, "clientId": "c-1", "clientName": "Acme", "items": items})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["status"], "pending");
    assert_eq!(sale["linkedQuoteId"], quote_id.as_str());

    let (status, body) = app.request("DELETE", &format!("/api/quotes/{quote_id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(app.count("SELECT COUNT(*) FROM quote_items").await, 0);

    let (_, sales) = app.request("GET", "/api/sales", Some(&token), None).await;
    assert_eq!(sales[0]["linkedQuoteId"], Value::Null);
    assert_eq!(sales[0]["items"].as_array().unwrap().len(), 1);

    let (status, _) = app.request("DELETE", &format!("/api/quotes/{quote_id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sale_with_unknown_quote_is_rejected() {
    let app = TestApp::new().await;
    let (_admin, token) = app.seed_user("Ada Admin", "ada", Role::Admin).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/sales",
            Some(&token),
            Some(json!({
                "linkedQuoteId": "no-such-quote",
                "clientId": "c-1",
                "clientName": "Acme",
                "items": [{"productName": "Widget", "quantity": 1, "unitPrice": 10}],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Linked quote not found");
    assert_eq!(app.count("SELECT COUNT(*) FROM sales").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM sale_items").await, 0);
}

#[tokio::test]
async fn plain_users_cannot_touch_quotes_or_sales() {
    let app = TestApp::new().await;
    let (_user, token) = app.seed_user("Uma User", "uma", Role::User).await;

    let (status, _) = app.request("GET", "/api/quotes", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.request("GET", "/api/sales", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .request(
            "POST",
            "/api/quotes",
            Some(&token),
            Some(quote_body(json!([{"productName": "Widget", "quantity": 1, "unitPrice": 1}]))),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.count("SELECT COUNT(*) FROM quotes").await, 0);
}
