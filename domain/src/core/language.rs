//! Language tag for submitted code snippets

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Source language of a submitted snippet (Value Object)
///
/// Used to tag the fenced code block in the generated prompt. Unknown
/// tags pass through unchanged so the gateway never rejects a request
/// over an unrecognized language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    Cpp,
    C,
    Rust,
    Python,
    Java,
    JavaScript,
    TypeScript,
    Go,
    Custom(String),
}

impl Language {
    /// Get the fence tag for this language
    pub fn as_str(&self) -> &str {
        match self {
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Rust => "rust",
            Language::Python => "python",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Custom(s) => s,
        }
    }
}

impl Default for Language {
    /// Returns the default language (cpp), matching the inbound contract
    fn default() -> Self {
        Language::Cpp
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "cpp" | "c++" => Language::Cpp,
            "c" => Language::C,
            "rust" | "rs" => Language::Rust,
            "python" | "py" => Language::Python,
            "java" => Language::Java,
            "javascript" | "js" => Language::JavaScript,
            "typescript" | "ts" => Language::TypeScript,
            "go" | "golang" => Language::Go,
            _ => Language::Custom(s.to_string()),
        })
    }
}

impl Serialize for Language {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cpp() {
        assert_eq!(Language::default(), Language::Cpp);
        assert_eq!(Language::default().as_str(), "cpp");
    }

    #[test]
    fn test_alias_normalization() {
        let lang: Language = "C++".parse().unwrap();
        assert_eq!(lang, Language::Cpp);
        let lang: Language = "py".parse().unwrap();
        assert_eq!(lang, Language::Python);
    }

    #[test]
    fn test_unknown_language_passes_through() {
        let lang: Language = "brainfuck".parse().unwrap();
        assert_eq!(lang.as_str(), "brainfuck");
    }
}
