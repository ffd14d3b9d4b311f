//! GenaiCompletionClient - streamed completions via the genai crate
//!
//! Fragments are concatenated in arrival order; nothing is surfaced until the
//! stream ends, and a mid-stream failure discards what was received. A stream
//! that closes without its end event counts as a failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::{future, stream, StreamExt};
use genai::chat::ChatStreamEvent;

use crate::error::{ToolError, ToolResult};
use crate::logging::Logger;
use crate::prompt::Prompt;
use crate::response::Completion;
use crate::secrets::Credential;

use super::genai_adapter::{create_client, from_genai_error, from_genai_event, open_chat_stream};
use super::traits::{
    collect_fragments, ensure_credential, CompletionClient, CompletionMode, CompletionTarget,
    FragmentStream,
};

/// Completion client that reads the upstream response as a stream
pub struct GenaiCompletionClient {
    target: CompletionTarget,
    logger: Arc<dyn Logger>,
}

impl GenaiCompletionClient {
    pub fn new(target: CompletionTarget, logger: Arc<dyn Logger>) -> Self {
        Self { target, logger }
    }

    pub fn target(&self) -> &CompletionTarget {
        &self.target
    }

    /// Open the upstream stream as text fragments
    ///
    /// The returned stream yields a trailing error if the upstream closes
    /// before sending its end event.
    pub async fn open_stream(
        &self,
        prompt: Prompt,
        credential: &Credential,
    ) -> ToolResult<FragmentStream> {
        let client = create_client(&self.target, credential);

        self.logger.info(&format!(
            "[GenaiCompletionClient] Starting stream: base={} model={}",
            self.target.api_base, self.target.model
        ));

        let chat_stream = open_chat_stream(&client, &self.target.model, prompt).await?;

        let finished = Arc::new(AtomicBool::new(false));

        let logger = Arc::clone(&self.logger);
        let seen_end = Arc::clone(&finished);
        let fragments = chat_stream.stream.filter_map(move |result| {
            let logger = Arc::clone(&logger);
            let seen_end = Arc::clone(&seen_end);
            async move {
                match result {
                    Ok(ChatStreamEvent::End(_)) => {
                        seen_end.store(true, Ordering::SeqCst);
                        None
                    }
                    Ok(event) => from_genai_event(event).map(Ok),
                    Err(e) => {
                        logger.error(&format!("[GenaiCompletionClient] Stream error: {}", e));
                        Some(Err(from_genai_error(e)))
                    }
                }
            }
        });

        let logger = Arc::clone(&self.logger);
        let truncated = stream::once(async move {
            if finished.load(Ordering::SeqCst) {
                return None;
            }
            logger.error("[GenaiCompletionClient] Stream closed before completion");
            Some(Err(ToolError::upstream("stream ended before completion")))
        })
        .filter_map(future::ready::<Option<ToolResult<String>>>);

        Ok(Box::pin(fragments.chain(truncated)))
    }
}

#[async_trait]
impl CompletionClient for GenaiCompletionClient {
    fn name(&self) -> &str {
        "genai"
    }

    fn mode(&self) -> CompletionMode {
        CompletionMode::Streamed
    }

    async fn complete(&self, prompt: Prompt, credential: &Credential) -> ToolResult<Completion> {
        ensure_credential(credential)?;
        let stream = self.open_stream(prompt, credential).await?;
        let completion = collect_fragments(stream).await?;
        self.logger.debug(&format!(
            "[GenaiCompletionClient] Stream complete: {} chars",
            completion.text.len()
        ));
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chunk(content: &str) -> String {
        let event = serde_json::json!({
            "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}]
        });
        format!("data: {}\n\n", event)
    }

    fn finish() -> String {
        let event = serde_json::json!({
            "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
        });
        format!("data: {}\n\ndata: [DONE]\n\n", event)
    }

    fn sse(body: String) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
    }

    fn client_for(server: &MockServer) -> GenaiCompletionClient {
        GenaiCompletionClient::new(
            CompletionTarget::new(format!("{}/v1", server.uri()), "inkeep-qa-sonnet-3-5"),
            Arc::new(NoOpLogger),
        )
    }

    fn client() -> GenaiCompletionClient {
        GenaiCompletionClient::new(
            CompletionTarget::new("http://127.0.0.1:9/v1", "inkeep-qa-sonnet-3-5"),
            Arc::new(NoOpLogger),
        )
    }

    #[test]
    fn test_identity() {
        let client = client();
        assert_eq!(client.name(), "genai");
        assert_eq!(client.mode(), CompletionMode::Streamed);
        assert_eq!(client.target().model, "inkeep-qa-sonnet-3-5");
    }

    #[tokio::test]
    async fn test_empty_credential_fails_before_connecting() {
        let err = client()
            .complete(Prompt::from("q"), &Credential::new(""))
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream_error() {
        let err = client()
            .complete(Prompt::from("q"), &Credential::new("ik"))
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_concatenates_streamed_chunks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer ik-test"))
            .respond_with(sse(format!(
                "{}{}{}{}",
                chunk("Use "),
                chunk("X "),
                chunk("docs."),
                finish()
            )))
            .expect(1)
            .mount(&server)
            .await;

        let completion = client_for(&server)
            .complete(Prompt::from("hello"), &Credential::new("ik-test"))
            .await
            .unwrap();
        assert_eq!(completion.text, "Use X docs.");
    }

    #[tokio::test]
    async fn test_non_success_status_matches_buffered_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(Prompt::from("q"), &Credential::new("ik"))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::upstream_status("Inkeep API", 500));
        assert_eq!(err.to_string(), "Inkeep API error: 500");
    }

    #[tokio::test]
    async fn test_malformed_chunk_fails_whole_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(sse(format!(
                "{}data: {{not json\n\n{}{}",
                chunk("partial "),
                chunk("more"),
                finish()
            )))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(Prompt::from("q"), &Credential::new("ik"))
            .await
            .unwrap_err();
        assert!(err.is_upstream());
        assert!(!err.to_string().contains('\n'));
    }

    #[tokio::test]
    async fn test_stream_closed_before_end_discards_partial_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(sse(chunk("partial ")))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(Prompt::from("q"), &Credential::new("ik"))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::upstream("stream ended before completion"));
    }
}
