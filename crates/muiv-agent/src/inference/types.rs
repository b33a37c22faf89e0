//! Wire types for the text-generation endpoint.
//!
//! The request side is fully typed.  The response side is not trusted: the
//! endpoint may answer with a list of generations, an error object, or
//! something that is not JSON at all.  [`GenerationOutcome`] names every one
//! of those shapes so callers never poke at optional fields directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generator::{GENERATION_FAILED_REPLY, REQUEST_FAILED_REPLY};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Sampling configuration sent with every request.
///
/// Fixed when the client is built; callers cannot change it per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Upper bound on the generated sequence length (prompt included).
    pub max_length: u32,
    /// Enable stochastic sampling instead of greedy decoding.
    pub do_sample: bool,
    /// Nucleus sampling threshold.
    pub top_p: f64,
    /// Top-k sampling cutoff.
    pub top_k: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_length: 100,
            do_sample: true,
            top_p: 0.95,
            top_k: 50,
        }
    }
}

/// JSON body of a generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    /// The prompt text.
    pub inputs: &'a str,
    /// Sampling parameters.
    pub parameters: &'a GenerationParameters,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Every shape a generation round trip can end in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// A list whose first element carried non-empty `generated_text`.
    Generated(String),

    /// A list that was empty, or whose first element had no usable
    /// `generated_text`.
    Empty,

    /// Valid JSON that is not a list, e.g. `{"error": "model loading"}`.
    StructuralError { reason: String },

    /// The body could not be parsed as JSON.
    Malformed { reason: String },

    /// The request never produced a readable body (connect error, timeout,
    /// interrupted read).
    Transport { reason: String },
}

impl GenerationOutcome {
    /// Decode a raw response body.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(e) => Self::Malformed {
                reason: format!("invalid JSON response: {e}"),
            },
        }
    }

    /// Decode an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                let Some(first) = items.first() else {
                    return Self::Empty;
                };
                match first.get("generated_text").and_then(Value::as_str) {
                    Some(text) if !text.is_empty() => Self::Generated(text.to_owned()),
                    _ => Self::Empty,
                }
            }
            Value::Object(map) => {
                let reason = map
                    .get("error")
                    .map(|err| match err {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .unwrap_or_else(|| "object without generations".to_owned());
                Self::StructuralError { reason }
            }
            other => Self::StructuralError {
                reason: format!("unexpected JSON value: {other}"),
            },
        }
    }

    /// Whether this outcome is anything other than [`GenerationOutcome::Generated`].
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Generated(_))
    }

    /// Short tag used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Generated(_) => "generated",
            Self::Empty => "empty",
            Self::StructuralError { .. } => "structural_error",
            Self::Malformed { .. } => "malformed",
            Self::Transport { .. } => "transport",
        }
    }

    /// Collapse the outcome into the string shown to the student.
    pub fn into_reply(self) -> String {
        match self {
            Self::Generated(text) => text,
            Self::Empty | Self::StructuralError { .. } => GENERATION_FAILED_REPLY.to_owned(),
            Self::Malformed { .. } | Self::Transport { .. } => REQUEST_FAILED_REPLY.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_wire_format() {
        let params = GenerationParameters::default();
        let body = serde_json::to_value(GenerationRequest {
            inputs: "расскажи анекдот",
            parameters: &params,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "inputs": "расскажи анекдот",
                "parameters": {
                    "max_length": 100,
                    "do_sample": true,
                    "top_p": 0.95,
                    "top_k": 50
                }
            })
        );
    }

    #[test]
    fn first_generation_is_used() {
        let outcome = GenerationOutcome::from_body(
            r#"[{"generated_text": "Вот анекдот..."}, {"generated_text": "второй"}]"#,
        );
        assert_eq!(outcome, GenerationOutcome::Generated("Вот анекдот...".into()));
        assert!(!outcome.is_failure());
        assert_eq!(outcome.into_reply(), "Вот анекдот...");
    }

    #[test]
    fn error_object_is_structural_error() {
        let outcome = GenerationOutcome::from_body(r#"{"error": "model loading"}"#);
        assert_eq!(
            outcome,
            GenerationOutcome::StructuralError {
                reason: "model loading".into()
            }
        );
        assert_eq!(outcome.into_reply(), GENERATION_FAILED_REPLY);
    }

    #[test]
    fn empty_list_is_empty() {
        let outcome = GenerationOutcome::from_body("[]");
        assert_eq!(outcome, GenerationOutcome::Empty);
        assert_eq!(outcome.into_reply(), GENERATION_FAILED_REPLY);
    }

    #[test]
    fn missing_or_blank_field_is_empty() {
        assert_eq!(
            GenerationOutcome::from_body(r#"[{"summary_text": "x"}]"#),
            GenerationOutcome::Empty
        );
        assert_eq!(
            GenerationOutcome::from_body(r#"[{"generated_text": ""}]"#),
            GenerationOutcome::Empty
        );
        assert_eq!(
            GenerationOutcome::from_body(r#"[{"generated_text": 42}]"#),
            GenerationOutcome::Empty
        );
        assert_eq!(
            GenerationOutcome::from_body(r#"["just a string"]"#),
            GenerationOutcome::Empty
        );
    }

    #[test]
    fn scalar_json_is_structural_error() {
        let outcome = GenerationOutcome::from_body("\"hello\"");
        assert_eq!(outcome.kind(), "structural_error");
        assert_eq!(outcome.into_reply(), GENERATION_FAILED_REPLY);

        let outcome = GenerationOutcome::from_body("null");
        assert_eq!(outcome.kind(), "structural_error");
    }

    #[test]
    fn non_json_body_is_malformed() {
        let outcome = GenerationOutcome::from_body("<html>502 Bad Gateway</html>");
        assert_eq!(outcome.kind(), "malformed");
        assert_eq!(outcome.into_reply(), REQUEST_FAILED_REPLY);

        assert_eq!(GenerationOutcome::from_body("").kind(), "malformed");
    }

    #[test]
    fn transport_maps_to_request_failed() {
        let outcome = GenerationOutcome::Transport {
            reason: "timed out".into(),
        };
        assert!(outcome.is_failure());
        assert_eq!(outcome.into_reply(), REQUEST_FAILED_REPLY);
    }
}
