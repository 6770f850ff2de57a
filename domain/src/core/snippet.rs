//! Validated code snippet value object

use crate::core::error::DomainError;

/// Maximum accepted snippet length in characters.
pub const MAX_SNIPPET_CHARS: usize = 50_000;

/// A validated source snippet submitted for explanation (Value Object)
///
/// Construction enforces the inbound contract: empty or whitespace-only
/// code and oversize code are rejected here, before any upstream call is
/// attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSnippet {
    content: String,
}

impl CodeSnippet {
    /// Validate and wrap raw submitted code
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyCode);
        }
        let len = content.chars().count();
        if len > MAX_SNIPPET_CHARS {
            return Err(DomainError::CodeTooLong {
                len,
                max: MAX_SNIPPET_CHARS,
            });
        }
        Ok(Self { content })
    }

    /// Get the snippet content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Snippet length in characters
    pub fn chars(&self) -> usize {
        self.content.chars().count()
    }
}

impl std::fmt::Display for CodeSnippet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
