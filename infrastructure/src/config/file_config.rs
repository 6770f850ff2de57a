//! Configuration file schema

use crate::openrouter::DEFAULT_BASE_URL;
use explainer_application::CallPolicy;
use explainer_domain::Model;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors found when validating a loaded configuration
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error(
        "No OpenRouter API key configured: set OPENROUTER_API_KEY or [openrouter].api_key"
    )]
    MissingApiKey,

    #[error("[call].{0} must not be empty")]
    EmptyCandidateList(&'static str),
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerConfig,
    pub openrouter: OpenRouterConfig,
    pub call: CallConfig,
    pub log: LogConfig,
}

impl FileConfig {
    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self
            .openrouter
            .api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            return Err(ConfigValidationError::MissingApiKey);
        }
        if self.call.explain_models.is_empty() {
            return Err(ConfigValidationError::EmptyCandidateList("explain_models"));
        }
        if self.call.visualize_models.is_empty() {
            return Err(ConfigValidationError::EmptyCandidateList(
                "visualize_models",
            ));
        }
        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer (the browser frontend).
    pub frontend_origins: Vec<String>,
    /// When true, an inbound disconnect does not abort the in-flight
    /// upstream call: the orchestration finishes in a detached task and
    /// partially billed upstream work is not wasted. When false, the
    /// request future is dropped with the connection.
    pub detach_on_disconnect: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5050,
            frontend_origins: vec!["http://localhost:3000".to_string()],
            detach_on_disconnect: true,
        }
    }
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    pub base_url: String,
    /// Normally sourced from the OPENROUTER_API_KEY environment variable.
    pub api_key: Option<String>,
    /// `HTTP-Referer` attribution header.
    pub referer: Option<String>,
    /// `X-Title` attribution header.
    pub title: Option<String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            referer: None,
            title: Some("Code Explainer".to_string()),
        }
    }
}

/// Candidate lists and retry/backoff settings for upstream calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CallConfig {
    pub explain_models: Vec<Model>,
    pub visualize_models: Vec<Model>,
    pub retries: u32,
    pub timeout_ms: u64,
    pub backoff_ms: u64,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            explain_models: Model::default_explain_candidates(),
            visualize_models: Model::default_visualize_candidates(),
            retries: 2,
            timeout_ms: 30_000,
            backoff_ms: 500,
        }
    }
}

impl CallConfig {
    /// Policy for the explanation flow.
    pub fn explain_policy(&self) -> CallPolicy {
        self.policy(self.explain_models.clone())
    }

    /// Policy for the visualization flow.
    pub fn visualize_policy(&self) -> CallPolicy {
        self.policy(self.visualize_models.clone())
    }

    fn policy(&self, candidates: Vec<Model>) -> CallPolicy {
        CallPolicy::default()
            .with_candidates(candidates)
            .with_retries(self.retries)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_backoff_step(Duration::from_millis(self.backoff_ms))
    }
}

/// Structured logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Path for the JSONL exchange log; absent disables it.
    pub exchange_file: Option<PathBuf>,
}
