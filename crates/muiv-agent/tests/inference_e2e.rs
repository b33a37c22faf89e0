//! End-to-end tests for the inference client.
//!
//! A real Axum server on an OS-assigned ephemeral port plays the role of the
//! generation endpoint, so every test goes through actual HTTP, JSON
//! encoding and reqwest's timeout and redirect handling.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect};
use axum::routing::post;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use muiv_agent::{
    GENERATION_FAILED_REPLY, GenerationOutcome, Generator, InferenceClient, InferenceConfig,
    REQUEST_FAILED_REPLY,
};

// ── helpers ──────────────────────────────────────────────────────────────────

async fn generated() -> Json<Value> {
    Json(json!([{ "generated_text": "Вот анекдот..." }]))
}

async fn model_loading() -> impl IntoResponse {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": "model loading", "estimated_time": 20.0 })),
    )
}

async fn garbage() -> &'static str {
    "<html>upstream exploded</html>"
}

async fn empty_list() -> Json<Value> {
    Json(json!([]))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!([{ "generated_text": "too late" }]))
}

/// Echo the request back inside `generated_text` so tests can inspect what
/// the client actually sent.
async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let summary = json!({ "body": body, "auth": auth }).to_string();
    Json(json!([{ "generated_text": summary }]))
}

/// Bind to 127.0.0.1:0, start the mock endpoint, return its base URL.
async fn start_mock_endpoint() -> (String, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route("/models/ok", post(generated))
        .route("/models/loading", post(model_loading))
        .route("/models/garbage", post(garbage))
        .route("/models/empty", post(empty_list))
        .route("/models/slow", post(slow))
        .route("/models/echo", post(echo))
        .route(
            "/models/moved",
            post(|| async { Redirect::temporary("/models/echo") }),
        );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind to port 0");
    let addr: SocketAddr = listener.local_addr().expect("get local addr");
    let base = format!("http://127.0.0.1:{}", addr.port());

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    tokio::time::sleep(Duration::from_millis(10)).await;

    (base, handle)
}

fn client_for(base: &str, model: &str) -> InferenceClient {
    let config = InferenceConfig::huggingface(model)
        .with_base_url(base)
        .with_timeout(Duration::from_millis(500));
    InferenceClient::new(config).expect("valid config")
}

// ── success ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn generated_text_is_returned_verbatim() {
    let (base, _srv) = start_mock_endpoint().await;
    let client = client_for(&base, "ok");

    let reply = client.generate("расскажи анекдот").await;
    assert_eq!(reply, "Вот анекдот...");
}

#[tokio::test]
async fn request_carries_inputs_parameters_and_token() {
    let (base, _srv) = start_mock_endpoint().await;
    let config = InferenceConfig::huggingface("echo")
        .with_base_url(&base)
        .with_api_token("hf_secret");
    let client = InferenceClient::new(config).unwrap();

    let reply = client.generate("расскажи анекдот").await;
    let echoed: Value = serde_json::from_str(&reply).expect("echo returns JSON");

    assert_eq!(echoed["auth"], "Bearer hf_secret");
    assert_eq!(echoed["body"]["inputs"], "расскажи анекдот");
    assert_eq!(echoed["body"]["parameters"]["max_length"], 100);
    assert_eq!(echoed["body"]["parameters"]["do_sample"], true);
    assert_eq!(echoed["body"]["parameters"]["top_p"], 0.95);
    assert_eq!(echoed["body"]["parameters"]["top_k"], 50);
}

#[tokio::test]
async fn temporary_redirect_is_followed_with_same_post() {
    let (base, _srv) = start_mock_endpoint().await;
    let client = client_for(&base, "moved");

    let outcome = client.infer("куда переехали?").await;
    let GenerationOutcome::Generated(text) = outcome else {
        panic!("expected Generated, got {outcome:?}");
    };
    let echoed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(echoed["body"]["inputs"], "куда переехали?");
    assert_eq!(echoed["auth"], "-");
}

// ── structural failures ──────────────────────────────────────────────────────

#[tokio::test]
async fn error_object_becomes_generation_failed_reply() {
    let (base, _srv) = start_mock_endpoint().await;
    let client = client_for(&base, "loading");

    let outcome = client.infer("расскажи анекдот").await;
    assert_eq!(
        outcome,
        GenerationOutcome::StructuralError {
            reason: "model loading".into()
        }
    );
    assert_eq!(client.generate("расскажи анекдот").await, GENERATION_FAILED_REPLY);
}

#[tokio::test]
async fn empty_list_becomes_generation_failed_reply() {
    let (base, _srv) = start_mock_endpoint().await;
    let client = client_for(&base, "empty");

    assert_eq!(client.infer("x").await, GenerationOutcome::Empty);
    assert_eq!(client.generate("x").await, GENERATION_FAILED_REPLY);
}

#[tokio::test]
async fn non_json_body_becomes_request_failed_reply() {
    let (base, _srv) = start_mock_endpoint().await;
    let client = client_for(&base, "garbage");

    assert_eq!(client.infer("x").await.kind(), "malformed");
    assert_eq!(client.generate("x").await, REQUEST_FAILED_REPLY);
}

#[tokio::test]
async fn unknown_route_is_not_a_generation() {
    let (base, _srv) = start_mock_endpoint().await;
    let client = client_for(&base, "does-not-exist");

    // Axum answers 404 with an empty body, which is not JSON.
    assert_eq!(client.generate("x").await, REQUEST_FAILED_REPLY);
}

// ── transport failures ───────────────────────────────────────────────────────

#[tokio::test]
async fn timeout_becomes_request_failed_reply() {
    let (base, _srv) = start_mock_endpoint().await;
    let client = client_for(&base, "slow");

    let started = std::time::Instant::now();
    let outcome = client.infer("x").await;
    assert_eq!(outcome.kind(), "transport");
    assert!(
        started.elapsed() < Duration::from_secs(4),
        "timeout must bound the call"
    );

    assert_eq!(client.generate("x").await, REQUEST_FAILED_REPLY);
}

#[tokio::test]
async fn stopped_server_becomes_request_failed_reply() {
    let (base, srv) = start_mock_endpoint().await;
    srv.abort();
    let _ = srv.await;

    let client = client_for(&base, "ok");
    assert_eq!(client.generate("x").await, REQUEST_FAILED_REPLY);
}
