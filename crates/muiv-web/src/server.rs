//! Main web server setup and startup.
//!
//! [`WebServer`] composes the Axum router, registers all routes, and starts
//! the HTTP listener.

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::response::Html;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use muiv_intent::Pipeline;

use crate::WebConfig;
use crate::api;
use crate::error::{Result, WebError};
use crate::frontend::INDEX_HTML;
use crate::state::AppState;

/// The assistant's web server.
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// # Arguments
    ///
    /// * `config` - Bind address and port configuration.
    /// * `pipeline` - The answer pipeline shared across all requests.
    /// * `model` - Remote model identifier, for `/api/status`.
    pub fn new(config: WebConfig, pipeline: Pipeline, model: impl Into<String>) -> Self {
        let state = Arc::new(AppState {
            pipeline,
            config: config.clone(),
            model: model.into(),
        });
        Self { config, state }
    }

    /// Return the `host:port` string this server will bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.bind_addr, self.config.port)
    }

    /// Build the Axum router with all routes registered.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);

        Router::new()
            // Embedded frontend.
            .route("/", get(|| async { Html(INDEX_HTML) }))
            // REST API.
            .route("/api/chat", post(api::chat).fallback(api::method_not_allowed))
            .route("/predict", post(api::predict).fallback(api::method_not_allowed))
            .route("/predict/", post(api::predict).fallback(api::method_not_allowed))
            .route("/api/greeting", get(api::greeting))
            .route("/api/status", get(api::status))
            .fallback(api::not_found)
            .layer(cors)
            .with_state(Arc::clone(&self.state))
    }

    /// Start the server and block until it is shut down (Ctrl-C).
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot be bound.
    pub async fn start(self) -> Result<()> {
        let addr = self.addr();
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| WebError::Bind {
                addr: addr.clone(),
                source,
            })?;

        tracing::info!(addr = %addr, "starting web server");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("web server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
