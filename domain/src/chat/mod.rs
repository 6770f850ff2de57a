//! Chat messages and the per-request upstream payload

pub mod message;
pub mod payload;

pub use message::{Message, Role};
pub use payload::{ChatPayload, Modality};
