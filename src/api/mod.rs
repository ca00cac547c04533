//! HTTP API handlers for blocktutor

pub mod chat;
pub mod health;
pub mod tutor;

pub use chat::chat_routes;
pub use health::health_routes;
pub use tutor::tutor_routes;
