use axum::Json;
use std::collections::BTreeMap;

use crate::services::{describe, SchemaEntry};

pub async fn get_schema() -> Json<BTreeMap<String, SchemaEntry>> {
    Json(describe())
}
