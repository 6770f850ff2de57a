//! Configuration: file schema and multi-source loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    CallConfig, ConfigValidationError, FileConfig, LogConfig, OpenRouterConfig, ServerConfig,
};
pub use loader::ConfigLoader;
