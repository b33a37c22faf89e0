//! REST API route handlers.
//!
//! Input validation lives here, not in the pipeline: a missing or blank
//! question is rejected with a 4xx JSON body before the pipeline sees it.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use muiv_intent::{Category, clean_text};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /api/chat
// ---------------------------------------------------------------------------

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    /// The student's question.
    #[serde(default)]
    pub question: Option<String>,
}

/// Answer a question through the pipeline.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatBody>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let question = match payload {
        Ok(Json(body)) => body.question,
        Err(rejection) => {
            debug!(error = %rejection, "chat body rejected");
            None
        }
    };

    let Some(question) = question.filter(|q| !q.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "No question provided" })),
        );
    };

    let answer = state.pipeline.respond(&question).await;
    info!(
        category = %answer.category,
        source = ?answer.source,
        "chat answered"
    );

    (
        StatusCode::OK,
        Json(json!({
            "answer": answer.text,
            "category": answer.category,
            "source": answer.source,
        })),
    )
}

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

/// Request body for the intent prediction endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictBody {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response body for the intent prediction endpoint.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub intent: Category,
}

/// Classify a text after normalization; no generation is involved.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictBody>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let text = match payload {
        Ok(Json(body)) => body.text.unwrap_or_default(),
        Err(rejection) => {
            debug!(error = %rejection, "predict body rejected");
            String::new()
        }
    };

    if text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Empty text provided" })),
        );
    }

    let cleaned = clean_text(&text);
    let intent = state.pipeline.classify(&cleaned);
    debug!(intent = %intent, "intent predicted");

    (StatusCode::OK, Json(json!(PredictResponse { intent })))
}

// ---------------------------------------------------------------------------
// GET /api/greeting, GET /api/status
// ---------------------------------------------------------------------------

/// The opening line for a new conversation.
pub async fn greeting(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "greeting": state.pipeline.greeting() }))
}

/// Response payload for the `/api/status` endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub categories: Vec<Category>,
    pub triggers: usize,
    pub model: String,
    /// Configured `host:port` the server listens on.
    pub addr: String,
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let knowledge = state.pipeline.knowledge();
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        categories: knowledge.entries().iter().map(|e| e.category).collect(),
        triggers: knowledge.trigger_count(),
        model: state.model.clone(),
        addr: format!("{}:{}", state.config.bind_addr, state.config.port),
    })
}

// ---------------------------------------------------------------------------
// Fallbacks
// ---------------------------------------------------------------------------

/// Any method other than the one a route accepts.
pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method not allowed" })),
    )
}

/// Unknown path.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}
