//! Application startup and lifecycle management.

use crate::config::Config;
use crate::handlers;
use crate::services::{init_metrics, MemoryStore, ReceiptStore};
use axum::{
    routing::{get, patch, post},
    Router,
};
use service_core::error::AppError;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The store is behind a trait object so a durable backend can replace
    /// the in-memory one without touching the handlers.
    pub store: Arc<dyn ReceiptStore>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        init_metrics();

        let store = MemoryStore::new();
        if config.seed_demo_data {
            store.seed_demo_data().await?;
            tracing::info!("Demo receipts seeded");
        }

        let state = AppState {
            config: config.clone(),
            store: Arc::new(store),
        };

        // Port 0 = random port for testing.
        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Receipt service: HTTP on port {}", port);

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

    /// Get the application state.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        if let Err(e) = axum::serve(self.listener, router).await {
            tracing::error!("HTTP server error: {}", e);
            return Err(std::io::Error::other(format!("HTTP server error: {}", e)));
        }

        Ok(())
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        // Receipt endpoints
        .route(
            "/api/receipts",
            get(handlers::receipts::list_receipts).post(handlers::receipts::create_receipt),
        )
        .route(
            "/api/receipts/export",
            post(handlers::receipts::export_receipts),
        )
        .route("/api/receipts/:id", get(handlers::receipts::get_receipt))
        .route(
            "/api/receipts/:id/status",
            patch(handlers::receipts::update_receipt_status),
        )
        // Schedule endpoints
        .route(
            "/api/schedules",
            get(handlers::schedules::list_schedules).post(handlers::schedules::create_schedule),
        )
        .route(
            "/api/schedules/:id",
            patch(handlers::schedules::update_schedule)
                .delete(handlers::schedules::delete_schedule),
        )
        // The browser client is served from another origin in development.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
