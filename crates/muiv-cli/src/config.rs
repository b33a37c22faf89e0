//! Application configuration.
//!
//! Reads `config/default.toml` (or the file given with `--config`) and then
//! applies environment overrides.  Missing files, sections, or keys fall
//! back to defaults; so do values of the wrong type or out of range.
//!
//! ```toml
//! [inference]
//! base_url = "https://api-inference.huggingface.co"
//! model = "sberbank-ai/rugpt3small_based_on_gpt2"
//! timeout_secs = 10
//! max_length = 100
//! do_sample = true
//! top_p = 0.95
//! top_k = 50
//!
//! [web]
//! bind = "127.0.0.1"
//! port = 8000
//!
//! [knowledge]
//! path = "config/knowledge.toml"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use muiv_agent::InferenceConfig;
use muiv_web::WebConfig;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the binary needs to build the pipeline and the server.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub inference: InferenceConfig,
    pub web: WebConfig,
    /// Optional knowledge base file; the built-in table is used when absent.
    pub knowledge_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from `path`, then apply environment overrides.
pub fn load_app_config(path: &Path) -> AppConfig {
    load_app_config_with(path, crate::helpers::env_non_empty)
}

/// Like [`load_app_config`], with an explicit environment lookup.
pub fn load_app_config_with<F>(path: &Path, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let config = match std::fs::read_to_string(path) {
        Ok(content) => parse_app_config(&content),
        Err(_) => {
            debug!(path = %path.display(), "config file not found, using defaults");
            AppConfig::default()
        }
    };

    apply_overrides(config, lookup)
}

/// Parse configuration text.  Invalid TOML yields the defaults.
pub fn parse_app_config(content: &str) -> AppConfig {
    let mut config = AppConfig::default();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "config file is not valid TOML, using defaults");
            return config;
        }
    };

    if let Some(toml::Value::Table(inference)) = table.get("inference") {
        let cfg = &mut config.inference;
        if let Some(url) = inference.get("base_url").and_then(|v| v.as_str()) {
            cfg.base_url = url.to_owned();
        }
        if let Some(model) = inference.get("model").and_then(|v| v.as_str()) {
            cfg.model = model.to_owned();
        }
        if let Some(secs) = inference
            .get("timeout_secs")
            .and_then(|v| v.as_integer())
            .filter(|&s| s > 0)
        {
            cfg.timeout = Duration::from_secs(secs as u64);
        }
        if let Some(max_length) = inference
            .get("max_length")
            .and_then(|v| v.as_integer())
            .and_then(|v| u32::try_from(v).ok())
            .filter(|&v| v > 0)
        {
            cfg.parameters.max_length = max_length;
        }
        if let Some(do_sample) = inference.get("do_sample").and_then(|v| v.as_bool()) {
            cfg.parameters.do_sample = do_sample;
        }
        if let Some(top_p) = inference
            .get("top_p")
            .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
            .filter(|&p| p > 0.0 && p <= 1.0)
        {
            cfg.parameters.top_p = top_p;
        }
        if let Some(top_k) = inference
            .get("top_k")
            .and_then(|v| v.as_integer())
            .and_then(|v| u32::try_from(v).ok())
        {
            cfg.parameters.top_k = top_k;
        }
    }

    if let Some(toml::Value::Table(web)) = table.get("web") {
        if let Some(bind) = web.get("bind").and_then(|v| v.as_str()) {
            config.web.bind_addr = bind.to_owned();
        }
        if let Some(port) = web
            .get("port")
            .and_then(|v| v.as_integer())
            .and_then(|v| u16::try_from(v).ok())
            .filter(|&p| p > 0)
        {
            config.web.port = port;
        }
    }

    if let Some(toml::Value::Table(knowledge)) = table.get("knowledge") {
        config.knowledge_path = knowledge
            .get("path")
            .and_then(|v| v.as_str())
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
    }

    config
}

/// Apply environment overrides using `lookup` (usually [`std::env::var`]
/// filtered to non-empty values).
///
/// | Variable | Effect |
/// |---|---|
/// | `MUIV_INFERENCE_URL` | inference base URL |
/// | `MUIV_MODEL` | model identifier |
/// | `MUIV_TIMEOUT_SECS` | request timeout |
/// | `HF_API_TOKEN` | bearer token |
pub fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("MUIV_INFERENCE_URL") {
        config.inference.base_url = url;
    }
    if let Some(model) = lookup("MUIV_MODEL") {
        config.inference.model = model;
    }
    if let Some(raw) = lookup("MUIV_TIMEOUT_SECS") {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => config.inference.timeout = Duration::from_secs(secs),
            _ => warn!(value = %raw, "ignoring invalid MUIV_TIMEOUT_SECS"),
        }
    }
    if let Some(token) = lookup("HF_API_TOKEN") {
        config.inference = config.inference.with_api_token(token);
    }
    config
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_config_is_defaults() {
        let config = parse_app_config("");
        assert_eq!(config.inference.model, muiv_agent::inference::DEFAULT_MODEL);
        assert_eq!(config.inference.timeout, Duration::from_secs(10));
        assert_eq!(config.web, WebConfig::default());
        assert!(config.knowledge_path.is_none());
    }

    #[test]
    fn sections_are_read() {
        let config = parse_app_config(
            r#"
            [inference]
            base_url = "http://localhost:8080"
            model = "local/gpt"
            timeout_secs = 3
            max_length = 64
            do_sample = false
            top_p = 1
            top_k = 10

            [web]
            bind = "0.0.0.0"
            port = 9000

            [knowledge]
            path = "kb.toml"
            "#,
        );

        assert_eq!(config.inference.endpoint(), "http://localhost:8080/models/local/gpt");
        assert_eq!(config.inference.timeout, Duration::from_secs(3));
        assert_eq!(config.inference.parameters.max_length, 64);
        assert!(!config.inference.parameters.do_sample);
        assert_eq!(config.inference.parameters.top_p, 1.0);
        assert_eq!(config.inference.parameters.top_k, 10);
        assert_eq!(config.web.bind_addr, "0.0.0.0");
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.knowledge_path, Some(PathBuf::from("kb.toml")));
    }

    #[test]
    fn invalid_values_fall_back_per_key() {
        let config = parse_app_config(
            r#"
            [inference]
            timeout_secs = 0
            top_p = 3.5
            max_length = "long"

            [web]
            port = 700000
            "#,
        );
        let defaults = AppConfig::default();
        assert_eq!(config.inference.timeout, defaults.inference.timeout);
        assert_eq!(config.inference.parameters, defaults.inference.parameters);
        assert_eq!(config.web.port, defaults.web.port);
    }

    #[test]
    fn invalid_toml_is_defaults() {
        let config = parse_app_config("[inference\nmodel = ");
        assert_eq!(config.inference.model, muiv_agent::inference::DEFAULT_MODEL);
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MUIV_INFERENCE_URL", "http://proxy:1234"),
            ("MUIV_MODEL", "other/model"),
            ("MUIV_TIMEOUT_SECS", "25"),
            ("HF_API_TOKEN", "hf_token"),
        ]);
        let config = apply_overrides(parse_app_config("[inference]\nmodel = \"x\""), |name| {
            env.get(name).map(|v| (*v).to_owned())
        });

        assert_eq!(config.inference.endpoint(), "http://proxy:1234/models/other/model");
        assert_eq!(config.inference.timeout, Duration::from_secs(25));
        assert_eq!(config.inference.api_token.as_deref(), Some("hf_token"));
    }

    #[test]
    fn invalid_timeout_override_is_ignored() {
        let config = apply_overrides(AppConfig::default(), |name| {
            (name == "MUIV_TIMEOUT_SECS").then(|| "soon".to_owned())
        });
        assert_eq!(config.inference.timeout, Duration::from_secs(10));
    }

    #[test]
    fn file_is_read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[web]\nport = 8123").unwrap();

        let config = load_app_config_with(file.path(), no_env);
        assert_eq!(config.web.port, 8123);
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_app_config_with(&dir.path().join("absent.toml"), no_env);
        assert_eq!(config.web, WebConfig::default());
        assert_eq!(config.inference.model, muiv_agent::inference::DEFAULT_MODEL);
    }
}
