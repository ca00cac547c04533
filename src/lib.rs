//! blocktutor library interface
//!
//! Backend relay for a block-code tutoring front end: accepts a screenshot
//! of visual block code plus optional notes, forwards them to a multimodal
//! inference provider, and returns a structured critique. No state outlives
//! a single request.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::services::CompletionBackend;

/// Uploaded images are capped at 10MB
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Inference backend, injected at startup (stubbed in tests)
    pub backend: Arc<dyn CompletionBackend>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::tutor_routes())
        .merge(api::chat_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // The tutoring front end runs on a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
