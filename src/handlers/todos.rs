use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::AppState;
use crate::error::{ApiError, ApiResult};
use crate::store::models::Todo;

#[derive(Debug, Default, Deserialize)]
pub struct AddTodoParams {
    pub task: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    Json(state.store.list())
}

/// Create a todo. `task` comes from the query string, falling back to a JSON body.
pub async fn add_todo(
    State(state): State<AppState>,
    params: Result<Query<AddTodoParams>, QueryRejection>,
    body: Bytes,
) -> ApiResult<Json<Todo>> {
    let Query(params) = params.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    let task = match params.task {
        Some(task) => task,
        None => {
            let from_body = if body.is_empty() {
                AddTodoParams::default()
            } else {
                serde_json::from_slice::<AddTodoParams>(&body)
                    .map_err(|e| ApiError::Unprocessable(format!("Invalid request body: {}", e)))?
            };
            from_body
                .task
                .ok_or_else(|| ApiError::Unprocessable("Field required: task".to_string()))?
        }
    };

    let todo = state.store.add(&task);
    info!(id = todo.id, "todo added");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = id.map_err(|e| ApiError::Unprocessable(e.body_text()))?;

    if state.store.delete(id) {
        info!(id, "todo deleted");
    } else {
        debug!(id, "delete requested for unknown todo");
    }

    Ok(Json(DeleteResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}
