//! HTTP request handlers.

mod chat;
mod todos;

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::relay::ChatRelay;
use crate::store::TodoStore;

pub use chat::{chat, ChatRequest, ChatResponse, NO_ANSWER_DETAIL};
pub use todos::{add_todo, delete_todo, list_todos, DeleteResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TodoStore>,
    pub relay: Arc<ChatRelay>,
    /// Report upstream LLM failures as 502 rather than folding them into 404.
    pub distinguish_upstream_errors: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
    pub todos: usize,
    pub document_chars: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        todos: state.store.len(),
        document_chars: state.relay.context().len(),
    })
}
