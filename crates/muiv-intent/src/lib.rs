//! Intent classification and answer pipeline for the MUIV student assistant.
//!
//! This crate provides:
//!
//! - **Knowledge base**: the ordered keyword table and canned replies, built
//!   in or loaded from TOML, via [`knowledge::KnowledgeBase`].
//! - **Classification**: substring keyword matching where the first declared
//!   category wins, via [`classifier::Classifier`].
//! - **Answer pipeline**: canned reply for known categories, remote
//!   generation for everything else, via [`pipeline::Pipeline`].

pub mod category;
pub mod classifier;
pub mod error;
pub mod knowledge;
pub mod pipeline;
pub mod preprocess;

pub use category::Category;
pub use classifier::Classifier;
pub use error::{IntentError, Result};
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use pipeline::{Answer, AnswerSource, Pipeline};
pub use preprocess::clean_text;
