//! Answer pipeline: turns a student message into a reply.
//!
//! The pipeline has a single branch point:
//!
//! 1. **Known category**: the canned reply from the knowledge base is
//!    returned immediately, with no I/O.
//! 2. **Unknown**: the message is forwarded once to the remote
//!    [`Generator`], whose contract guarantees a displayable string.
//!
//! Nothing here returns an error; every failure has already been folded
//! into a reply by the time it reaches the caller.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use muiv_agent::Generator;

use crate::category::Category;
use crate::classifier::Classifier;
use crate::knowledge::KnowledgeBase;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Canned reply from the local knowledge base.
    KnowledgeBase,
    /// Remote generation fallback.
    Generator,
}

/// A reply together with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub category: Category,
    pub text: String,
    pub source: AnswerSource,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Classifier, knowledge base and remote fallback composed together.
///
/// Cloning is cheap; all state is immutable and shared.
#[derive(Clone)]
pub struct Pipeline {
    classifier: Arc<Classifier>,
    generator: Arc<dyn Generator>,
}

impl Pipeline {
    pub fn new(knowledge: Arc<KnowledgeBase>, generator: Arc<dyn Generator>) -> Self {
        Self {
            classifier: Arc::new(Classifier::new(knowledge)),
            generator,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        self.classifier.knowledge()
    }

    pub fn classify(&self, text: &str) -> Category {
        self.classifier.classify(text)
    }

    /// Canned reply for `category`; the local fallback for `Unknown`.
    pub fn resolve(&self, category: Category) -> &str {
        self.knowledge().resolve(category)
    }

    /// The opening line of a conversation.
    pub fn greeting(&self) -> &str {
        self.knowledge().greeting()
    }

    /// Answer `text`, reporting the category and source alongside.
    pub async fn respond(&self, text: &str) -> Answer {
        let category = self.classify(text);

        if category.is_known() {
            debug!(category = %category, "answering from knowledge base");
            return Answer {
                category,
                text: self.resolve(category).to_owned(),
                source: AnswerSource::KnowledgeBase,
            };
        }

        info!(chars = text.chars().count(), "no local match, delegating to generator");
        let reply = self.generator.generate(text).await;

        Answer {
            category,
            text: reply,
            source: AnswerSource::Generator,
        }
    }

    /// Answer `text`.  Always returns a displayable string.
    pub async fn answer(&self, text: &str) -> String {
        self.respond(text).await.text
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
