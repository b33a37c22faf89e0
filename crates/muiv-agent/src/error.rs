//! Agent error types.
//!
//! Generation itself never fails from the caller's point of view (every
//! failure becomes a fixed reply), so [`AgentError`] only covers setting the
//! client up.

/// Unified error type for the agent crate.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    // -- Configuration errors ------------------------------------------------
    /// A configuration value is out of range or missing.
    #[error("invalid inference config: {reason}")]
    InvalidConfig { reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {reason}")]
    ClientBuild { reason: String },
}

/// Convenience alias used throughout the agent crate.
pub type Result<T> = std::result::Result<T, AgentError>;

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        Self::ClientBuild {
            reason: err.to_string(),
        }
    }
}
