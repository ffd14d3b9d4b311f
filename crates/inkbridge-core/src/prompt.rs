//! Prompt assembly
//!
//! Renders a [`ToolRequest`] into the single user message sent upstream.
//! Section order is fixed: query line, code block, code-analysis line,
//! context block, instruction footer. Only the query line and the footer
//! are unconditional.

use std::fmt;

use crate::request::ToolRequest;

/// Leading line; the query text follows it directly
pub const QUERY_PREAMBLE: &str =
    "Find the most relevant resources, documentation, and guides for the following Solana-related query: ";

/// Language tag on the fenced code block
pub const CODE_FENCE_LANGUAGE: &str = "solana";

/// Appended after the code block when code is present
pub const CODE_ANALYSIS_INSTRUCTION: &str =
    "Above is the code snippet related to the query. Please analyze it and provide relevant resources or solutions.";

/// Label line of the context block
pub const CONTEXT_LABEL: &str = "Additional context provided by the user:";

/// Fixed instruction footer. Part of the wire contract; do not edit.
pub const INSTRUCTION_FOOTER: &str = "Instructions:
1. Focus on providing official and high-quality resources for Solana developers.
2. Include direct links to documentation, code examples, and learning materials where relevant.
3. Categorize resources when possible (official docs, tutorials, tools, etc.).
4. Be comprehensive but prioritize the most relevant resources first.
5. If specific technical topics are mentioned in the query, provide specialized resources for those topics.
6. If code snippets are provided, give resources that specifically address the code issues or implementation details.
7. For error messages, include troubleshooting guides or references to similar issues and solutions.";

/// An assembled upstream prompt
///
/// Built once per request and moved into the completion call that consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the fenced code block, or nothing when `code` is empty
fn code_section(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    format!(
        "```{}\n{}\n```\n\n{}\n\n",
        CODE_FENCE_LANGUAGE, code, CODE_ANALYSIS_INSTRUCTION
    )
}

fn context_section(context: &str) -> String {
    if context.is_empty() {
        return String::new();
    }
    format!("{}\n{}\n\n", CONTEXT_LABEL, context)
}

/// Assemble the upstream prompt for a request
pub fn assemble(request: &ToolRequest) -> Prompt {
    let mut prompt = String::with_capacity(
        QUERY_PREAMBLE.len()
            + request.query.len()
            + request.code().len()
            + request.context().len()
            + INSTRUCTION_FOOTER.len()
            + 256,
    );

    prompt.push_str(QUERY_PREAMBLE);
    prompt.push_str(&request.query);
    prompt.push_str("\n\n");
    prompt.push_str(&code_section(request.code()));
    prompt.push_str(&context_section(request.context()));
    prompt.push('\n');
    prompt.push_str(INSTRUCTION_FOOTER);

    Prompt(prompt)
}
