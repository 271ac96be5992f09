use axum::{response::IntoResponse, Json};
use serde_json::json;

pub async fn read_root() -> impl IntoResponse {
    Json(json!({ "message": "Hello from the Rust backend!" }))
}

pub async fn hello() -> impl IntoResponse {
    Json(json!({ "message": "Hello from the backend API!" }))
}
