//! HTTP server
//!
//! Wires the todo store and chat relay into an axum router and serves it.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{Config, CorsSettings};
use crate::doc_processor::load_document;
use crate::handlers::{self, AppState};
use crate::llm::GeminiClient;
use crate::relay::ChatRelay;
use crate::store::TodoStore;

/// Create the router with all routes, CORS and request tracing.
pub fn build_router(state: AppState, cors: &CorsSettings) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/todos", get(handlers::list_todos).post(handlers::add_todo))
        .route("/todos/:id", delete(handlers::delete_todo))
        .route("/chat", post(handlers::chat))
        .with_state(state)
        .layer(cors.to_layer())
        .layer(TraceLayer::new_for_http())
}

/// Load the document, build shared state and serve until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.listen_addr()?;

    let context = load_document(&config.document)
        .with_context(|| format!("Failed to load document {}", config.document.display()))?;

    let client = GeminiClient::new(config.gemini(), config.llm_timeout())
        .context("Failed to build LLM client")?;
    info!(
        model = %client.config().model,
        timeout_secs = ?config.llm_timeout_secs,
        "LLM client ready"
    );

    let state = AppState {
        store: Arc::new(TodoStore::new()),
        relay: Arc::new(ChatRelay::new(context, client).with_temperature(config.temperature)),
        distinguish_upstream_errors: config.distinguish_upstream_errors,
    };
    let app = build_router(state, &config.cors());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {}", addr))?;

    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
