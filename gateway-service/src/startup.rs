use crate::config::{GatewayConfig, StoreBackend};
use crate::handlers::{self, create_record, get_record, list_records};
use crate::models::{Product, User};
use crate::services::{DocumentStore, EnvPresence, HealthReporter, MemoryStore, MongoStore};
use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, request_span};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub store: Arc<dyn DocumentStore>,
    pub health: HealthReporter,
}

impl AppState {
    pub fn new(config: GatewayConfig, store: Arc<dyn DocumentStore>) -> Self {
        let health = HealthReporter::new(store.clone(), EnvPresence::from(&config.database));
        Self {
            config,
            store,
            health,
        }
    }
}

/// Open the store selected by `config.store`.
pub async fn connect_store(config: &GatewayConfig) -> Arc<dyn DocumentStore> {
    match config.store {
        StoreBackend::Mongo => Arc::new(
            MongoStore::connect(
                config.database.url.as_deref(),
                config.database.resolved_name(),
            )
            .await,
        ),
        StoreBackend::Memory => {
            tracing::info!("Using in-memory document store");
            Arc::new(MemoryStore::new())
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/", get(handlers::read_root))
        .route("/api/hello", get(handlers::hello))
        .route("/api/health", get(handlers::health_check))
        .route("/test", get(handlers::health_check))
        .route("/api/schema", get(handlers::get_schema))
        .route(
            "/api/users",
            get(list_records::<User>).post(create_record::<User>),
        )
        .route("/api/users/:id", get(get_record::<User>))
        .route(
            "/api/products",
            get(list_records::<Product>).post(create_record::<Product>),
        )
        .route("/api/products/:id", get(get_record::<Product>))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await;
        let state = AppState::new(config.clone(), store);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(std::future::pending::<()>()).await
    }

    /// Serve until `signal` resolves, then release the store.
    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let store = self.state.store.clone();
        let app = build_router(self.state);

        tracing::info!("Listening on {}", self.port);
        let result = axum::serve(self.listener, app)
            .with_graceful_shutdown(signal)
            .await;

        store.shutdown().await;
        result
    }
}
