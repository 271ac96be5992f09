//! Diagnostic report served by `/api/health` and `/test`.

use serde::Serialize;
use service_core::error::{truncate_message, MAX_DETAIL_CHARS};
use std::sync::Arc;

use super::store::{ConnectionState, DocumentStore};
use crate::config::DatabaseConfig;

pub const MAX_REPORTED_COLLECTIONS: usize = 10;

const BACKEND_RUNNING: &str = "✅ Running";
const DB_CONNECTED: &str = "✅ Connected & Working";
const DB_NOT_INITIALIZED: &str = "⚠️  Available but not initialized";
const SET: &str = "✅ Set";
const NOT_SET: &str = "❌ Not Set";
const STATUS_CONNECTED: &str = "Connected";
const STATUS_NOT_CONNECTED: &str = "Not Connected";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Which connection settings were present in the environment at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvPresence {
    pub database_url: bool,
    pub database_name: bool,
}

impl From<&DatabaseConfig> for EnvPresence {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            database_url: config.url.is_some(),
            database_name: config.name.is_some(),
        }
    }
}

#[derive(Clone)]
pub struct HealthReporter {
    store: Arc<dyn DocumentStore>,
    env: EnvPresence,
}

impl HealthReporter {
    pub fn new(store: Arc<dyn DocumentStore>, env: EnvPresence) -> Self {
        Self { store, env }
    }

    /// Probe the store and describe what was found. Never fails; every
    /// problem ends up in the `database` field.
    pub async fn check(&self) -> HealthReport {
        let mut report = HealthReport {
            backend: BACKEND_RUNNING.to_string(),
            database: DB_NOT_INITIALIZED.to_string(),
            database_url: presence(self.env.database_url),
            database_name: presence(self.env.database_name),
            connection_status: STATUS_NOT_CONNECTED.to_string(),
            collections: Vec::new(),
        };

        match self.store.connection_state() {
            ConnectionState::Uninitialized => {}
            ConnectionState::Failed(e) => {
                report.database =
                    format!("❌ Error: {}", truncate_message(&e, MAX_DETAIL_CHARS));
            }
            ConnectionState::Connected => match self.store.list_collection_names().await {
                Ok(names) => {
                    report.collections =
                        names.into_iter().take(MAX_REPORTED_COLLECTIONS).collect();
                    report.connection_status = STATUS_CONNECTED.to_string();
                    report.database = DB_CONNECTED.to_string();
                }
                Err(e) => {
                    tracing::warn!("Health probe could not list collections: {}", e);
                    report.database = format!(
                        "⚠️  Connected but Error: {}",
                        truncate_message(&e.to_string(), MAX_DETAIL_CHARS)
                    );
                }
            },
        }

        report
    }
}

fn presence(set: bool) -> String {
    let label = if set { SET } else { NOT_SET };
    label.to_string()
}
