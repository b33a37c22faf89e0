//! Intent crate error types.
//!
//! Classification and answering are total, so every variant here comes from
//! loading or validating a knowledge base.

use std::path::PathBuf;

/// Unified error type for the intent crate.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    // -- Knowledge base validation -------------------------------------------
    /// The label does not name a category that can carry triggers.
    #[error("invalid category label `{label}`")]
    InvalidCategory { label: String },

    /// The same category was declared twice.
    #[error("category `{label}` declared more than once")]
    DuplicateCategory { label: String },

    /// A trigger is empty after trimming; it would match every message.
    #[error("category `{label}` has an empty trigger")]
    EmptyTrigger { label: String },

    /// A reply is empty after trimming.
    #[error("reply for `{label}` is empty")]
    EmptyReply { label: String },

    // -- Loading ---------------------------------------------------------------
    /// The knowledge base file could not be read.
    #[error("failed to read knowledge base {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The knowledge base file is not valid TOML for the expected layout.
    #[error("knowledge base parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience alias used throughout the intent crate.
pub type Result<T> = std::result::Result<T, IntentError>;
