//! Shared helper functions used across CLI subcommands.
//!
//! Includes tracing initialization, environment variable utilities, and
//! pipeline construction from the loaded configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use muiv_agent::{Generator, InferenceClient};
use muiv_intent::{KnowledgeBase, Pipeline};

use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Read an environment variable, treating empty values as unset.
pub fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Load the knowledge base named by the config, or the built-in table.
pub fn load_knowledge(config: &AppConfig) -> Result<KnowledgeBase> {
    match config.knowledge_path {
        Some(ref path) => KnowledgeBase::load(path)
            .with_context(|| format!("failed to load knowledge base {}", path.display())),
        None => Ok(KnowledgeBase::builtin()),
    }
}

/// Build the answer pipeline with the remote inference client as generator.
pub fn build_pipeline(config: &AppConfig) -> Result<Pipeline> {
    let knowledge = load_knowledge(config)?;
    let client = InferenceClient::new(config.inference.clone())
        .context("failed to create inference client")?;

    info!(
        endpoint = %client.endpoint(),
        categories = knowledge.entries().len(),
        triggers = knowledge.trigger_count(),
        "pipeline ready"
    );

    let generator: Arc<dyn Generator> = Arc::new(client);
    Ok(Pipeline::new(Arc::new(knowledge), generator))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use muiv_intent::Category;

    #[test]
    fn builtin_knowledge_without_path() {
        let knowledge = load_knowledge(&AppConfig::default()).unwrap();
        assert_eq!(knowledge, KnowledgeBase::builtin());
    }

    #[test]
    fn knowledge_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [[category]]
            label = "контакты"
            triggers = ["деканат"]
            reply = "Деканат: каб. 101."
            "#
        )
        .unwrap();

        let config = AppConfig {
            knowledge_path: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        let pipeline = build_pipeline(&config).unwrap();
        assert_eq!(pipeline.classify("где деканат"), Category::Contacts);
        assert_eq!(pipeline.resolve(Category::Contacts), "Деканат: каб. 101.");
    }

    #[test]
    fn missing_knowledge_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            knowledge_path: Some(dir.path().join("absent.toml")),
            ..AppConfig::default()
        };
        assert!(build_pipeline(&config).is_err());
    }

    #[test]
    fn invalid_inference_config_is_an_error() {
        let mut config = AppConfig::default();
        config.inference.model = String::new();
        assert!(build_pipeline(&config).is_err());
    }

    #[test]
    fn empty_env_var_is_unset() {
        assert!(env_non_empty("MUIV_SURELY_UNSET_VARIABLE").is_none());
    }
}
