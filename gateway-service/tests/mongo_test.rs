//! End-to-end tests against a live MongoDB.

mod common;

use common::TestApp;
use reqwest::Client;
use serde_json::{json, Value};

#[tokio::test]
#[ignore = "Requires MongoDB at mongodb://localhost:27017"]
async fn user_round_trip_through_mongodb() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/users", app.address))
        .json(&json!({"name": "Alice", "email": "a@example.com"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse JSON");
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let response = client
        .get(format!("{}/api/users/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);
    let user: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(user["id"], id);
    assert_eq!(user["name"], "Alice");
    assert_eq!(user["email"], "a@example.com");

    let response = client
        .get(format!("{}/api/users/507f1f77bcf86cd799439011", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at mongodb://localhost:27017"]
async fn health_reports_live_collections() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    client
        .post(format!("{}/api/products", app.address))
        .json(&json!({"title": "Lamp", "price": 19.5, "category": "home"}))
        .send()
        .await
        .expect("Failed to execute request");

    let body: Value = client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(body["database"], "✅ Connected & Working");
    assert_eq!(body["database_url"], "✅ Set");
    assert_eq!(body["database_name"], "✅ Set");
    assert!(body["collections"]
        .as_array()
        .unwrap()
        .contains(&json!("product")));

    app.cleanup().await;
}
