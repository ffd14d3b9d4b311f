//! Mock completion client for testing
//!
//! Provides deterministic, configurable outcomes without network dependencies
//! and records every call so tests can assert on call counts and prompts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use parking_lot::Mutex;

use crate::error::{ToolError, ToolResult};
use crate::logging::Logger;
use crate::prompt::Prompt;
use crate::response::Completion;
use crate::secrets::Credential;

use super::traits::{collect_fragments, ensure_credential, CompletionClient, CompletionMode};

/// Mock outcome
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Return a fixed completion
    Fixed(String),
    /// Stream these fragments, then concatenate
    Chunks(Vec<String>),
    /// Return an empty completion
    Empty,
    /// Fail as a non-success HTTP status would
    Status(u16),
    /// Emit `delivered` fragments, then fail mid-stream
    StreamError { delivered: Vec<String>, message: String },
}

impl Default for MockMode {
    fn default() -> Self {
        MockMode::Fixed("Use X docs.".to_string())
    }
}

/// Mock completion client
pub struct MockCompletionClient {
    mode: MockMode,
    reported_mode: CompletionMode,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    logger: Arc<dyn Logger>,
}

impl MockCompletionClient {
    pub fn new(mode: MockMode, logger: Arc<dyn Logger>) -> Self {
        Self {
            mode,
            reported_mode: CompletionMode::Buffered,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            logger,
        }
    }

    pub fn fixed(text: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::new(MockMode::Fixed(text.into()), logger)
    }

    pub fn chunked(chunks: Vec<&str>, logger: Arc<dyn Logger>) -> Self {
        Self::new(
            MockMode::Chunks(chunks.into_iter().map(String::from).collect()),
            logger,
        )
        .with_mode(CompletionMode::Streamed)
    }

    pub fn empty(logger: Arc<dyn Logger>) -> Self {
        Self::new(MockMode::Empty, logger)
    }

    pub fn status(code: u16, logger: Arc<dyn Logger>) -> Self {
        Self::new(MockMode::Status(code), logger)
    }

    pub fn stream_error(
        delivered: Vec<&str>,
        message: impl Into<String>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self::new(
            MockMode::StreamError {
                delivered: delivered.into_iter().map(String::from).collect(),
                message: message.into(),
            },
            logger,
        )
        .with_mode(CompletionMode::Streamed)
    }

    /// Override the mode reported by [`CompletionClient::mode`]
    pub fn with_mode(mut self, mode: CompletionMode) -> Self {
        self.reported_mode = mode;
        self
    }

    /// Number of `complete` calls that got past the credential check
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    fn name(&self) -> &str {
        "mock"
    }

    fn mode(&self) -> CompletionMode {
        self.reported_mode
    }

    async fn complete(&self, prompt: Prompt, credential: &Credential) -> ToolResult<Completion> {
        ensure_credential(credential)?;

        self.calls.fetch_add(1, Ordering::SeqCst);
        self.logger.debug(&format!(
            "[MockCompletionClient] complete: mode={:?}, prompt_len={}",
            self.mode,
            prompt.len()
        ));
        *self.last_prompt.lock() = Some(prompt.into_string());

        match &self.mode {
            MockMode::Fixed(text) => Ok(Completion::new(text.clone())),
            MockMode::Empty => Ok(Completion::default()),
            MockMode::Status(code) => Err(ToolError::upstream_status("Inkeep API", *code)),
            MockMode::Chunks(chunks) => {
                let fragments: Vec<ToolResult<String>> = chunks.iter().cloned().map(Ok).collect();
                collect_fragments(Box::pin(stream::iter(fragments))).await
            }
            MockMode::StreamError { delivered, message } => {
                let mut fragments: Vec<ToolResult<String>> =
                    delivered.iter().cloned().map(Ok).collect();
                fragments.push(Err(ToolError::upstream(message.clone())));
                collect_fragments(Box::pin(stream::iter(fragments))).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    fn logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger)
    }

    #[tokio::test]
    async fn test_fixed_records_call_and_prompt() {
        let mock = MockCompletionClient::fixed("answer", logger());
        let completion = mock
            .complete(Prompt::from("question"), &Credential::new("ik"))
            .await
            .unwrap();
        assert_eq!(completion.text, "answer");
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_prompt().as_deref(), Some("question"));
    }

    #[tokio::test]
    async fn test_chunks_are_concatenated() {
        let mock = MockCompletionClient::chunked(vec!["Use ", "X ", "docs."], logger());
        assert_eq!(mock.mode(), CompletionMode::Streamed);
        let completion = mock
            .complete(Prompt::from("q"), &Credential::new("ik"))
            .await
            .unwrap();
        assert_eq!(completion.text, "Use X docs.");
    }

    #[tokio::test]
    async fn test_stream_error_has_no_partial_text() {
        let mock = MockCompletionClient::stream_error(vec!["partial"], "reset", logger());
        let err = mock
            .complete(Prompt::from("q"), &Credential::new("ik"))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::upstream("reset"));
    }

    #[tokio::test]
    async fn test_empty_credential_is_not_counted() {
        let mock = MockCompletionClient::empty(logger());
        assert!(mock.complete(Prompt::from("q"), &Credential::new("")).await.is_err());
        assert_eq!(mock.calls(), 0);
    }
}
