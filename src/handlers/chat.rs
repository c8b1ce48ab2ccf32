use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::{ApiError, ApiResult};
use crate::relay::AnswerError;

pub const NO_ANSWER_DETAIL: &str = "No relevant answer found";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

pub async fn chat(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(request) = request.map_err(|e| ApiError::Unprocessable(e.body_text()))?;

    match state.relay.answer(&request.message).await {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(AnswerError::NoMatch) => Err(ApiError::NotFound(NO_ANSWER_DETAIL.to_string())),
        Err(AnswerError::Upstream(_)) if state.distinguish_upstream_errors => Err(
            ApiError::BadGateway("Upstream model request failed".to_string()),
        ),
        Err(AnswerError::Malformed(_)) if state.distinguish_upstream_errors => Err(
            ApiError::BadGateway("Upstream model returned a malformed response".to_string()),
        ),
        Err(_) => Err(ApiError::NotFound(NO_ANSWER_DETAIL.to_string())),
    }
}
