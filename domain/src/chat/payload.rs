//! Chat payload assembled once per inbound request

use crate::chat::message::Message;
use serde::{Deserialize, Serialize};

/// Output modality hint passed to the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
}

/// The model-independent part of an upstream request (Value Object)
///
/// Built exactly once per inbound request and immutable thereafter. The
/// call orchestrator substitutes each candidate model into it; retries
/// and fallbacks always send the same payload.
#[derive(Debug, Clone, Serialize)]
pub struct ChatPayload {
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modalities: Option<Vec<Modality>>,
}

impl ChatPayload {
    /// Build a payload from a single user prompt
    pub fn from_user_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            modalities: None,
        }
    }

    /// Build a payload from an ordered message sequence
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            modalities: None,
        }
    }

    /// Request specific output modalities (e.g. image generation)
    pub fn with_modalities(mut self, modalities: Vec<Modality>) -> Self {
        self.modalities = Some(modalities);
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn modalities(&self) -> Option<&[Modality]> {
        self.modalities.as_deref()
    }
}
