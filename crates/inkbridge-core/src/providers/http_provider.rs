//! Buffered completion client
//!
//! Posts a single OpenAI-style chat-completions request and reads the first
//! choice from the JSON body.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};
use crate::logging::Logger;
use crate::prompt::Prompt;
use crate::response::Completion;
use crate::secrets::Credential;
use crate::types::ChatMessage;
use crate::{log_debug, log_warn};

use super::traits::{
    ensure_credential, CompletionClient, CompletionMode, CompletionTarget, UPSTREAM_SERVICE,
};

#[derive(Debug, Serialize)]
struct CompletionRequestBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CompletionResponseBody {
    choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponseBody {
    /// First choice's content, or empty when the body carries none
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

/// Completion client that waits for the whole response
pub struct HttpCompletionClient {
    target: CompletionTarget,
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl HttpCompletionClient {
    pub fn new(target: CompletionTarget, logger: Arc<dyn Logger>) -> Self {
        Self {
            target,
            http: reqwest::Client::new(),
            logger,
        }
    }

    pub fn target(&self) -> &CompletionTarget {
        &self.target
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    fn name(&self) -> &str {
        "http"
    }

    fn mode(&self) -> CompletionMode {
        CompletionMode::Buffered
    }

    async fn complete(&self, prompt: Prompt, credential: &Credential) -> ToolResult<Completion> {
        ensure_credential(credential)?;

        let url = self.target.chat_completions_url();
        log_debug!(
            self.logger,
            "[HttpCompletionClient] POST {} model={} prompt_len={}",
            url,
            self.target.model,
            prompt.len()
        );

        let body = CompletionRequestBody {
            model: &self.target.model,
            messages: vec![ChatMessage::user(prompt.into_string())],
        };

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, credential.bearer())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log_warn!(self.logger, "[HttpCompletionClient] upstream returned {}", status);
            return Err(ToolError::upstream_status(UPSTREAM_SERVICE, status.as_u16()));
        }

        let parsed: CompletionResponseBody = response
            .json()
            .await
            .map_err(|e| ToolError::upstream(format!("Invalid response from {}: {}", UPSTREAM_SERVICE, e)))?;

        Ok(Completion::new(parsed.into_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpCompletionClient {
        let target = CompletionTarget::new(format!("{}/v1", server.uri()), "inkeep-qa-sonnet-3-5");
        HttpCompletionClient::new(target, Arc::new(NoOpLogger))
    }

    #[tokio::test]
    async fn test_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer ik-test"))
            .and(body_json(json!({
                "model": "inkeep-qa-sonnet-3-5",
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "Use X docs."}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
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
    async fn test_missing_content_is_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let completion = client_for(&server)
            .complete(Prompt::from("q"), &Credential::new("ik"))
            .await
            .unwrap();
        assert!(completion.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(Prompt::from("q"), &Credential::new("ik"))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::upstream_status("Inkeep API", 502));
        assert_eq!(err.to_string(), "Inkeep API error: 502");
    }

    #[tokio::test]
    async fn test_malformed_body_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(Prompt::from("q"), &Credential::new("ik"))
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_empty_credential_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(Prompt::from("q"), &Credential::new(""))
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
