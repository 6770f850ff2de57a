//! OpenRouter adapter: wire types and the HTTP transport

pub mod protocol;
pub mod transport;

pub use transport::{DEFAULT_BASE_URL, OpenRouterCredentials, OpenRouterTransport};
