//! Prompt templates for explanation and visualization requests

use crate::core::{language::Language, snippet::CodeSnippet};

/// Templates for generating the upstream prompt for each operation
pub struct PromptTemplate;

impl PromptTemplate {
    /// User prompt for the text explanation flow
    ///
    /// Asks for an algorithm-style summary followed by a bold
    /// `CODE EXPLANATION` section, with the snippet in a fenced block
    /// tagged with its language.
    pub fn explanation(language: &Language, code: &CodeSnippet) -> String {
        format!(
            r#"Explain the following {language} code with this structure:

1. First, provide a **clear, concise algorithm-style summary** of what the code does.
   - Use step-by-step bullets.
   - Highlight key terms like loops, functions, conditions, or important values in **bold**.

2. After that, add a large bold section header that says: **CODE EXPLANATION**
   - Then explain the code line-by-line or block-by-block in simple language.

Here is the code:
```{language}
{code}
```"#,
            language = language,
            code = code,
        )
    }

    /// User prompt for the diagram/visualization flow
    ///
    /// Sent together with an image output modality; the reply is expected
    /// to carry a rendered diagram rather than prose.
    pub fn visualization(language: &Language, code: &CodeSnippet) -> String {
        format!(
            r#"Generate a single clear diagram that visualizes the following {language} code.

Requirements:
- Show the control flow (branches, loops, function calls) as a flowchart.
- Label each step with short plain-language descriptions, not raw code.
- Use distinct shapes for decisions, loops, and terminal states.
- Render the diagram as an image.

Here is the code:
```{language}
{code}
```"#,
            language = language,
            code = code,
        )
    }
}
