//! The remote fallback seam.
//!
//! The pipeline only knows about [`Generator`]; the production implementation
//! is [`crate::InferenceClient`], tests plug in their own.

use async_trait::async_trait;

/// Reply used when the model answered but produced nothing usable
/// (empty list, missing `generated_text`, error object).
pub const GENERATION_FAILED_REPLY: &str = "Извините, я не смог сгенерировать ответ.";

/// Reply used when the request could not be completed at all
/// (transport failure, timeout, body that is not JSON).
pub const REQUEST_FAILED_REPLY: &str = "Извините, произошла ошибка при обработке запроса.";

/// Something that turns free text into a displayable answer.
///
/// Implementations must be total: every failure is converted into a
/// human-readable string, never surfaced as an error or panic.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce an answer for `text`.
    async fn generate(&self, text: &str) -> String;
}
