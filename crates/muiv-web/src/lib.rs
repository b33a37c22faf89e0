//! Web interface for the MUIV student assistant.
//!
//! This crate provides an HTTP server that exposes the answer pipeline:
//!
//! - `POST /api/chat`: answer a student question.
//! - `POST /predict`: return the intent label for a text.
//! - `GET /api/greeting`, `GET /api/status`: small read-only endpoints.
//! - An embedded single-page chat frontend served at `/`.

pub mod api;
pub mod error;
pub mod frontend;
pub mod server;
pub mod state;

pub use error::{Result, WebError};
pub use server::WebServer;
pub use state::AppState;

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: 8000,
        }
    }
}
