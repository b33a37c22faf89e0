//! HTTP client for the hosted text-generation endpoint.
//!
//! Speaks the Hugging Face Inference API text-generation protocol: a single
//! `POST {base_url}/models/{model}` with `{inputs, parameters}` and a JSON
//! list of `{generated_text}` objects on success.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use tracing::{debug, warn};

use crate::error::{AgentError, Result};
use crate::generator::Generator;
use crate::inference::types::{GenerationOutcome, GenerationParameters, GenerationRequest};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default Inference API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "sberbank-ai/rugpt3small_based_on_gpt2";

/// Default upper bound on a whole round trip, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum number of redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a single generation endpoint.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Base URL of the Inference API (no trailing `/models`).
    pub base_url: String,
    /// Model identifier appended to `/models/`.
    pub model: String,
    /// Optional bearer token.
    pub api_token: Option<String>,
    /// Timeout applied to the whole request, body included.
    pub timeout: Duration,
    /// Sampling parameters sent with every request.
    pub parameters: GenerationParameters,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            parameters: GenerationParameters::default(),
        }
    }
}

impl InferenceConfig {
    /// Configuration for the public Hugging Face endpoint and `model`.
    pub fn huggingface(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Point the client at a different base URL (self-hosted TGI, a proxy,
    /// a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attach a bearer token.  Blank tokens are ignored.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.api_token = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Full URL the generation request is posted to.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model.trim_matches('/')
        )
    }

    /// Reject values that would make every request fail or hang.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(AgentError::InvalidConfig {
                reason: "base_url is empty".into(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(AgentError::InvalidConfig {
                reason: "model is empty".into(),
            });
        }
        if self.timeout.is_zero() {
            return Err(AgentError::InvalidConfig {
                reason: "timeout must be greater than zero".into(),
            });
        }
        let p = &self.parameters;
        if p.max_length == 0 {
            return Err(AgentError::InvalidConfig {
                reason: "max_length must be greater than zero".into(),
            });
        }
        if !(p.top_p > 0.0 && p.top_p <= 1.0) {
            return Err(AgentError::InvalidConfig {
                reason: format!("top_p must be in (0, 1], got {}", p.top_p),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the text-generation endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    config: Arc<InferenceConfig>,
    endpoint: Arc<str>,
    http: reqwest::Client,
}

impl InferenceClient {
    /// Create a new client with the given configuration.
    pub fn new(config: InferenceConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("muiv-assistant/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let endpoint = Arc::from(config.endpoint());

        Ok(Self {
            config: Arc::new(config),
            endpoint,
            http,
        })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one generation round trip and decode the result.
    ///
    /// Non-2xx statuses are not special-cased: the body is decoded by shape
    /// like any other, so an API error object becomes
    /// [`GenerationOutcome::StructuralError`].
    pub async fn infer(&self, text: &str) -> GenerationOutcome {
        let body = GenerationRequest {
            inputs: text,
            parameters: &self.config.parameters,
        };

        let mut request = self.http.post(self.endpoint()).json(&body);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                return GenerationOutcome::Transport {
                    reason: describe_transport_error(&e),
                };
            }
        };

        let status = resp.status();
        let raw = match resp.text().await {
            Ok(raw) => raw,
            Err(e) => {
                let reason = describe_transport_error(&e);
                return GenerationOutcome::Transport {
                    reason: format!("failed to read response body: {reason}"),
                };
            }
        };

        debug!(
            status = %status,
            body_len = raw.len(),
            "generation endpoint responded"
        );

        GenerationOutcome::from_body(&raw)
    }
}

#[async_trait]
impl Generator for InferenceClient {
    async fn generate(&self, text: &str) -> String {
        let outcome = self.infer(text).await;

        if outcome.is_failure() {
            let reason = match &outcome {
                GenerationOutcome::StructuralError { reason }
                | GenerationOutcome::Malformed { reason }
                | GenerationOutcome::Transport { reason } => reason.as_str(),
                _ => "no generated text",
            };
            warn!(
                kind = outcome.kind(),
                endpoint = %self.endpoint,
                reason = %reason,
                "generation request failed"
            );
        } else {
            debug!(kind = outcome.kind(), "generation succeeded");
        }

        outcome.into_reply()
    }
}

/// Render a reqwest error with the distinction that matters in logs.
fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else if err.is_redirect() {
        format!("redirect policy violated: {err}")
    } else {
        err.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
