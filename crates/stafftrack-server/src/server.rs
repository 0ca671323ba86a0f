//! Router assembly and the listening server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Request, Response};
use axum::routing::{get, put};
use stafftrack_db_memory::create_memory_store;
use stafftrack_registry::{AuditTrail, Registry, TracingSink};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Span;

use crate::config::AppConfig;
use crate::handlers::{self, AppState};

/// Assembles the API router with its middleware stack. Every module
/// shares the two record routes; the module segment picks the binding.
pub fn build_app(cfg: &AppConfig, registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health))
        .route("/api/modules", get(handlers::list_modules))
        .route("/api/activity", get(handlers::activity))
        .route(
            "/api/{module}/records",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route(
            "/api/{module}/records/{id}",
            put(handlers::update_record).delete(handlers::delete_record),
        )
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        status = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    let status = u64::from(response.status().as_u16());
                    span.record("status", status);
                    tracing::info!(
                        status,
                        elapsed_ms = latency.as_millis() as u64,
                        "request handled"
                    );
                }),
        )
        .layer(TimeoutLayer::new(cfg.read_timeout()))
        .layer(DefaultBodyLimit::max(cfg.server.body_limit_bytes))
        .with_state(AppState { registry })
}

/// Builder wiring config and registry into a runnable server.
pub struct ServerBuilder {
    config: AppConfig,
    registry: Option<Arc<Registry>>,
}

impl ServerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            registry: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Registry to serve. Without one, the server builds its own over a
    /// fresh in-memory store.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn build(self) -> StafftrackServer {
        let registry = self.registry.unwrap_or_else(|| {
            Arc::new(Registry::new(
                create_memory_store(),
                Arc::new(TracingSink),
                Arc::new(AuditTrail::default()),
            ))
        });
        StafftrackServer {
            addr: self.config.addr(),
            app: build_app(&self.config, registry),
        }
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built server, ready to listen.
pub struct StafftrackServer {
    addr: SocketAddr,
    app: Router,
}

impl StafftrackServer {
    /// Binds the configured address and serves until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns an error when the bind fails or the accept loop dies.
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!(addr = %self.addr, "listening");
        axum::serve(listener, self.app)
            .with_graceful_shutdown(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("shutting down");
                }
            })
            .await?;
        Ok(())
    }
}
