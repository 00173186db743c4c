//! Application startup and lifecycle management.

use crate::config::QueueConfig;
use crate::handlers::{self, records, suggestions};
use crate::services::providers::{gemini::GeminiTextProvider, TextProvider};
use crate::services::{init_metrics, Database, SuggestionService};
use axum::{
    middleware::from_fn,
    routing::{get, patch, post, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::{http_trace_layer, request_id_middleware},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub suggestions: SuggestionService,
}

/// Routes and middleware for the HTTP API.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/records/:kind",
            get(records::list_records).post(records::create_record),
        )
        .route(
            "/records/:kind/:id",
            put(records::update_record).delete(records::delete_record),
        )
        .route("/records/:kind/:id/status", patch(records::update_status))
        .route("/suggestions", post(suggestions::create_suggestion))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: QueueConfig) -> Result<Self, AppError> {
        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to open database: {}", e);
            e
        })?;

        db.ensure_schema().await.map_err(|e| {
            tracing::error!("Failed to create tables: {}", e);
            e
        })?;

        init_metrics();

        let provider: Arc<dyn TextProvider> =
            Arc::new(GeminiTextProvider::new(config.gemini.clone())?);
        tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");

        let state = AppState {
            db,
            suggestions: SuggestionService::new(provider),
        };

        // Port 0 picks a random port, used by the integration tests
        let address = format!("{}:{}", config.common.host, config.common.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Queue service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let db = self.state.db.clone();
        let app = router(self.state);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })?;

        db.close().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
