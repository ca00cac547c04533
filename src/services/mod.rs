//! Core request-processing services
//!
//! Per-request flow: prompt (payload construction) -> openai_client
//! (single outbound call) -> sanitizer -> validator. Handlers in `api`
//! map the outcome to HTTP responses.

pub mod openai_client;
pub mod prompt;
pub mod sanitizer;
pub mod validator;

pub use openai_client::{CompletionBackend, OpenAiClient, RawCompletion, UpstreamError};
pub use validator::ParsedResult;
