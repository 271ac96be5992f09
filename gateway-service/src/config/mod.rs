use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_DATABASE_NAME: &str = "gateway_db";

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub store: StoreBackend,
    pub cors: CorsConfig,
}

/// Connection settings exactly as found in the environment.
///
/// Both values stay optional so the health report can tell whether they were
/// provided at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub name: Option<String>,
}

impl DatabaseConfig {
    pub fn resolved_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_DATABASE_NAME)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the gateway settings on top of `common`, reading variables
    /// through `lookup`.
    pub fn from_lookup<F>(mut common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            common.port = port.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid PORT '{}': {}", port, e))
            })?;
        }

        if let Some(endpoint) = non_empty(lookup("OTLP_ENDPOINT")) {
            common.otlp_endpoint = Some(endpoint);
        }

        if let Some(level) = non_empty(lookup("LOG_LEVEL")) {
            common.log_level = level;
        }

        let store = lookup("STORE_BACKEND")
            .unwrap_or_else(|| "mongo".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec!["*".to_string()]);

        Ok(GatewayConfig {
            common,
            database: DatabaseConfig {
                url: non_empty(lookup("DATABASE_URL")),
                name: non_empty(lookup("DATABASE_NAME")),
            },
            store,
            cors: CorsConfig { allowed_origins },
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<GatewayConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewayConfig::from_lookup(core_config::Config::default(), |key| {
            vars.get(key).cloned()
        })
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config.common.port, 8000);
        assert_eq!(config.store, StoreBackend::Mongo);
        assert_eq!(config.cors.allowed_origins, vec!["*"]);
        assert!(config.database.url.is_none());
        assert_eq!(config.database.resolved_name(), DEFAULT_DATABASE_NAME);
    }

    #[test]
    fn reads_database_settings() {
        let config = load(&[
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("DATABASE_NAME", "shop"),
            ("PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(
            config.database.url.as_deref(),
            Some("mongodb://localhost:27017")
        );
        assert_eq!(config.database.resolved_name(), "shop");
        assert_eq!(config.common.port, 9000);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("DATABASE_URL", "  "), ("DATABASE_NAME", "")]).unwrap();
        assert!(config.database.url.is_none());
        assert!(config.database.name.is_none());
    }

    #[test]
    fn splits_cors_origins() {
        let config = load(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000, https://app.example.com",
        )])
        .unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:3000", "https://app.example.com"]
        );
    }

    #[test]
    fn rejects_unknown_backend_and_bad_port() {
        assert!(matches!(
            load(&[("STORE_BACKEND", "redis")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn selects_memory_backend() {
        let config = load(&[("STORE_BACKEND", "Memory")]).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
    }
}
