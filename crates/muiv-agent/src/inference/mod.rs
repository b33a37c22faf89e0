//! Hosted inference integration.
//!
//! - [`types`] -- Wire types and the [`GenerationOutcome`] decoder.
//! - [`client`] -- HTTP client for the text-generation endpoint.

pub mod client;
pub mod types;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, InferenceClient, InferenceConfig,
};
pub use types::{GenerationOutcome, GenerationParameters, GenerationRequest};
