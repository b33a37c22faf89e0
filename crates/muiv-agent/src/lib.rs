//! Remote generation layer for the MUIV student assistant.
//!
//! When a student question matches nothing in the local knowledge base, the
//! assistant forwards it to a hosted text-generation model.  This crate owns
//! that round trip:
//!
//! ```text
//! ┌───────────┐  POST /models/{model}  ┌──────────────────┐
//! │ Generator │───────────────────────>│ Inference API    │
//! │  (trait)  │<───────────────────────│ (Hugging Face)   │
//! └─────┬─────┘   JSON (untrusted)     └──────────────────┘
//!       │
//!       └── GenerationOutcome ──> display string
//! ```
//!
//! ## Modules
//!
//! - [`generator`] -- The [`Generator`] seam consumed by the pipeline.
//! - [`inference`] -- HTTP client, wire types and response decoding.
//! - [`error`] -- Agent error types.

pub mod error;
pub mod generator;
pub mod inference;

pub use error::{AgentError, Result};
pub use generator::{GENERATION_FAILED_REPLY, Generator, REQUEST_FAILED_REPLY};
pub use inference::{
    GenerationOutcome, GenerationParameters, GenerationRequest, InferenceClient, InferenceConfig,
};
