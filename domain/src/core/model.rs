//! Model value object representing an upstream OpenRouter model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An OpenRouter model identifier (Value Object)
///
/// One entry in a candidate list. Candidate lists are ordered: the
/// orchestrator tries entries first to last and stops at the first
/// success.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Text / code explanation models
    DevstralSmall,
    QwenCoder,
    DeepseekChat,
    // Image-capable models
    GeminiFlashImage,
    // Anything else configured by the operator
    Custom(String),
}

impl Model {
    /// Get the OpenRouter identifier string for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::DevstralSmall => "mistralai/devstral-small-2505:free",
            Model::QwenCoder => "qwen/qwen-2.5-coder-32b-instruct:free",
            Model::DeepseekChat => "deepseek/deepseek-chat:free",
            Model::GeminiFlashImage => "google/gemini-2.5-flash-image-preview",
            Model::Custom(s) => s,
        }
    }

    /// Default candidate list for text explanation requests
    pub fn default_explain_candidates() -> Vec<Model> {
        vec![Model::DevstralSmall, Model::QwenCoder, Model::DeepseekChat]
    }

    /// Default candidate list for visualization requests
    pub fn default_visualize_candidates() -> Vec<Model> {
        vec![Model::GeminiFlashImage]
    }

    /// Check if this identifier names a free-tier endpoint
    pub fn is_free(&self) -> bool {
        self.as_str().ends_with(":free")
    }
}

impl Default for Model {
    /// Returns the default explanation model
    fn default() -> Self {
        Model::DevstralSmall
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "mistralai/devstral-small-2505:free" => Model::DevstralSmall,
            "qwen/qwen-2.5-coder-32b-instruct:free" => Model::QwenCoder,
            "deepseek/deepseek-chat:free" => Model::DeepseekChat,
            "google/gemini-2.5-flash-image-preview" => Model::GeminiFlashImage,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}
