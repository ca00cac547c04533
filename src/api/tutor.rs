//! Image-bearing tutoring endpoints
//!
//! POST /api/openai/debug and POST /api/openai/flashcards share one
//! parameterized flow: read the multipart upload, build the instruction
//! payload for the task variant, make the single outbound call, then map
//! the parsed completion to the response contract. A completion that is
//! not valid JSON degrades to a soft 200 carrying the raw text so the
//! front end can still show something useful.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::models::TaskVariant;
use crate::services::{prompt, validator, ParsedResult};
use crate::AppState;

/// Fixed user-safe message for upstream failures on these endpoints
const STUDY_MATERIAL_ERROR: &str = "failed to generate study material";

/// Warning string attached to soft parse-failure responses
const PARSE_WARNING: &str = "model did not return valid JSON";

/// Uploaded screenshot plus notes, held in memory only for this request
struct Upload {
    image: Vec<u8>,
    mime_type: String,
    notes: String,
}

/// Read the multipart form: mandatory `image` field, optional `notes`.
///
/// The mime type comes from the part's declared content type, falling back
/// to sniffing the bytes, then to image/png.
async fn read_upload(mut multipart: Multipart) -> ApiResult<Upload> {
    let mut image: Option<(Vec<u8>, Option<String>)> = None;
    let mut notes = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        // Take the name up front; reading the field consumes it
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let declared = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidInput(format!("failed to read image: {e}")))?;
                image = Some((bytes.to_vec(), declared));
            }
            "notes" => {
                notes = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InvalidInput(format!("failed to read notes: {e}")))?;
            }
            _ => {}
        }
    }

    let (image, declared) = image.ok_or_else(|| {
        ApiError::MissingInput("no image uploaded, expected field name: image".to_string())
    })?;
    if image.is_empty() {
        return Err(ApiError::MissingInput("uploaded image is empty".to_string()));
    }

    let mime_type = declared
        .filter(|m| m.starts_with("image/"))
        .or_else(|| infer::get(&image).map(|t| t.mime_type().to_string()))
        .unwrap_or_else(|| "image/png".to_string());

    Ok(Upload {
        image,
        mime_type,
        notes,
    })
}

/// Shared dispatch flow for the image-bearing task variants.
///
/// The extractor arrives unresolved so a non-multipart request maps to the
/// JSON `{"error": ...}` body instead of axum's plain-text rejection.
async fn run_vision_task(
    state: AppState,
    variant: TaskVariant,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Value>> {
    let multipart = multipart.map_err(|e| {
        ApiError::InvalidInput(format!("expected a multipart form upload: {e}"))
    })?;
    let upload = read_upload(multipart).await?;

    tracing::info!(
        variant = ?variant,
        image_bytes = upload.image.len(),
        mime_type = %upload.mime_type,
        has_notes = !upload.notes.is_empty(),
        "running vision task"
    );

    let messages =
        prompt::build_vision_messages(variant, &upload.notes, &upload.image, &upload.mime_type);

    let completion = state
        .backend
        .complete(variant.default_model(), messages)
        .await
        .map_err(|source| ApiError::Upstream {
            user_message: STUDY_MATERIAL_ERROR,
            source,
        })?;

    match validator::parse_completion(&completion.text) {
        ParsedResult::Valid(value) => Ok(Json(json!({
            "output": validator::normalize(variant, value),
        }))),
        ParsedResult::Invalid { raw } => {
            tracing::warn!(variant = ?variant, "completion was not valid JSON, returning raw text");
            Ok(Json(json!({
                "output": [],
                "raw": raw,
                "warning": PARSE_WARNING,
            })))
        }
    }
}

/// GET /api/openai/debug
///
/// Liveness check for the tutoring front end; no side effects.
pub async fn debug_liveness() -> Json<Value> {
    Json(json!({
        "message": "Debug endpoint is working. POST an image + notes to test.",
    }))
}

/// POST /api/openai/debug
pub async fn debug_program(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Value>> {
    run_vision_task(state, TaskVariant::DebugReport, multipart).await
}

/// POST /api/openai/flashcards
pub async fn generate_flashcards(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Value>> {
    run_vision_task(state, TaskVariant::FlashcardSet, multipart).await
}

/// Build tutoring routes
pub fn tutor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/openai/debug",
            get(debug_liveness).post(debug_program),
        )
        .route("/api/openai/flashcards", post(generate_flashcards))
}
