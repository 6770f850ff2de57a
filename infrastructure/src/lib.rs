//! Infrastructure layer for code-explainer
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the OpenRouter HTTP transport, configuration file
//! loading, and the JSONL exchange logger.

pub mod config;
pub mod logging;
pub mod openrouter;

// Re-export commonly used types
pub use config::{
    CallConfig, ConfigLoader, ConfigValidationError, FileConfig, LogConfig, OpenRouterConfig,
    ServerConfig,
};
pub use logging::JsonlExchangeLogger;
pub use openrouter::{DEFAULT_BASE_URL, OpenRouterCredentials, OpenRouterTransport};
