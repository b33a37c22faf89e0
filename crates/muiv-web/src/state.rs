//! Shared application state for the web server.
//!
//! [`AppState`] is wrapped in an `Arc` and shared across all request
//! handlers.  Everything in it is immutable after startup.

use muiv_intent::Pipeline;

use crate::WebConfig;

/// Shared state accessible from every Axum handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The answer pipeline (knowledge base + remote fallback).
    pub pipeline: Pipeline,

    /// Web server configuration.
    pub config: WebConfig,

    /// Identifier of the remote generation model, reported by `/api/status`.
    pub model: String,
}
