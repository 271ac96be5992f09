#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use gateway_service::config::GatewayConfig;
use gateway_service::services::{DocumentStore, MemoryStore};
use gateway_service::startup::{build_router, AppState, Application};
use http_body_util::BodyExt;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const MONGO_TEST_URI: &str = "mongodb://localhost:27017";

/// Gateway settings built from `vars` only, never from the process env.
pub fn test_config(vars: &[(&str, &str)]) -> GatewayConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut common = CoreConfig::default();
    common.port = 0; // Random port for testing
    GatewayConfig::from_lookup(common, |key| vars.get(key).cloned())
        .expect("Failed to build test configuration")
}

/// Router over a fresh in-memory store.
pub fn memory_app() -> Router {
    app_with_store(
        test_config(&[("STORE_BACKEND", "memory")]),
        Arc::new(MemoryStore::new()),
    )
}

pub fn app_with_store(config: GatewayConfig, store: Arc<dyn DocumentStore>) -> Router {
    build_router(AppState::new(config, store))
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Full server on a random port, backed by MongoDB.
pub struct TestApp {
    pub address: String,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("gateway_test_{}", unique_suffix());
        let config = test_config(&[
            ("DATABASE_URL", MONGO_TEST_URI),
            ("DATABASE_NAME", db_name.as_str()),
        ]);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/api/health", address))
                .send()
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, db_name }
    }

    pub async fn cleanup(&self) {
        if let Ok(client) = mongodb::Client::with_uri_str(MONGO_TEST_URI).await {
            let _ = client.database(&self.db_name).drop(None).await;
        }
    }
}

fn unique_suffix() -> String {
    mongodb::bson::oid::ObjectId::new().to_hex()
}
