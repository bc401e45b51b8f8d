//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod handlers;
mod server;
pub mod validation;

pub use handlers::{ApiError, AppState};
pub use server::HttpServer;
