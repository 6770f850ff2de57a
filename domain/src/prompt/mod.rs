//! Prompt templates for the gateway's two operations

pub mod template;

pub use template::PromptTemplate;
