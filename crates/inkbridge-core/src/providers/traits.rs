//! Completion client trait definition

use std::fmt;
use std::pin::Pin;
use std::str::FromStr;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::error::{ToolError, ToolResult};
use crate::prompt::Prompt;
use crate::response::Completion;
use crate::secrets::Credential;

/// Upstream service name used in error messages
pub(crate) const UPSTREAM_SERVICE: &str = "Inkeep API";

/// How the upstream completion is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionMode {
    /// One request, one JSON response
    Buffered,
    /// Incremental fragments, concatenated before returning
    Streamed,
}

impl CompletionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionMode::Buffered => "buffered",
            CompletionMode::Streamed => "streamed",
        }
    }
}

impl fmt::Display for CompletionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buffered" | "buffer" | "http" => Ok(CompletionMode::Buffered),
            "streamed" | "stream" | "streaming" => Ok(CompletionMode::Streamed),
            other => Err(format!("unknown completion mode: {}", other)),
        }
    }
}

/// Where and with which model a client talks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionTarget {
    /// OpenAI-compatible base URL, e.g. `https://api.inkeep.com/v1`
    pub api_base: String,
    /// Fixed model identifier
    pub model: String,
}

impl CompletionTarget {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            model: model.into(),
        }
    }

    /// Base URL with exactly one trailing slash
    pub fn base_with_slash(&self) -> String {
        format!("{}/", self.api_base.trim_end_matches('/'))
    }

    /// Full chat-completions URL
    pub fn chat_completions_url(&self) -> String {
        format!("{}chat/completions", self.base_with_slash())
    }
}

impl From<&CompletionConfig> for CompletionTarget {
    fn from(config: &CompletionConfig) -> Self {
        Self::new(config.api_base.clone(), config.model.clone())
    }
}

/// Text fragments in arrival order
pub type FragmentStream = Pin<Box<dyn Stream<Item = ToolResult<String>> + Send>>;

/// Upstream completion call
///
/// Implementations make exactly one attempt per call and never return
/// partial text: a call either yields the whole aggregate or an error.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Client name for diagnostics
    fn name(&self) -> &str;

    fn mode(&self) -> CompletionMode;

    /// Run one completion for `prompt`
    async fn complete(&self, prompt: Prompt, credential: &Credential) -> ToolResult<Completion>;
}

/// Fail before any network activity when the credential is unusable
pub(crate) fn ensure_credential(credential: &Credential) -> ToolResult<()> {
    if credential.is_empty() {
        return Err(ToolError::Configuration("Missing API key.".to_string()));
    }
    Ok(())
}

/// Concatenate a fragment stream
///
/// The first error aborts collection and the accumulated text is dropped.
pub async fn collect_fragments(mut stream: FragmentStream) -> ToolResult<Completion> {
    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        text.push_str(&fragment?);
    }
    Ok(Completion::new(text))
}
