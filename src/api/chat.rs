//! Raw chat relay endpoint
//!
//! POST /api/openai/chat forwards a caller-supplied message array to the
//! provider and returns the single completion message untouched.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::models::TaskVariant;
use crate::services::openai_client::ChatMessage;
use crate::AppState;

/// Fixed user-safe message for upstream failures on this endpoint
const CHAT_ERROR: &str = "failed to generate chat response";

/// POST /api/openai/chat
///
/// Body: `{"messages": [{role, content}, ...], "model"?: string}`.
/// The body is validated by hand rather than through a typed extractor so
/// malformed shapes yield a 400 with an `error` field, and so validation
/// happens before any outbound call. The Json extractor arrives unresolved
/// for the same reason: a non-JSON body keeps the `{"error": ...}` contract.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) =
        body.map_err(|e| ApiError::InvalidInput(format!("expected a JSON body: {e}")))?;

    let messages = body.get("messages").ok_or_else(|| {
        ApiError::InvalidInput("invalid messages format, expected an array of messages".to_string())
    })?;
    if !messages.is_array() {
        return Err(ApiError::InvalidInput(
            "invalid messages format, expected an array of messages".to_string(),
        ));
    }

    let messages: Vec<ChatMessage> = serde_json::from_value(messages.clone()).map_err(|_| {
        ApiError::InvalidInput("each message must have a role and content".to_string())
    })?;
    if messages.is_empty() {
        return Err(ApiError::InvalidInput(
            "messages array must not be empty".to_string(),
        ));
    }

    let model = body
        .get("model")
        .and_then(Value::as_str)
        .unwrap_or(TaskVariant::RawChat.default_model());

    tracing::info!(model = model, turns = messages.len(), "relaying chat request");

    let completion = state
        .backend
        .complete(model, messages)
        .await
        .map_err(|source| ApiError::Upstream {
            user_message: CHAT_ERROR,
            source,
        })?;

    Ok(Json(json!({
        "output": {
            "role": completion.role,
            "content": completion.text,
        }
    })))
}

/// Build chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/api/openai/chat", post(chat))
}
