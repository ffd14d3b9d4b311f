//! Adapter between inkbridge types and genai types
//!
//! The completion endpoint speaks the OpenAI protocol at a non-OpenAI URL, so
//! every request is routed through a `ServiceTargetResolver` that pins the
//! endpoint, the adapter kind and the caller's credential. genai's own env var
//! lookup is never consulted.

use genai::chat::{ChatMessage as GenaiMessage, ChatRequest, ChatStreamEvent};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{adapter::AdapterKind, Client, ModelIden, ServiceTarget};

use crate::error::{ToolError, ToolResult};
use crate::prompt::Prompt;
use crate::secrets::Credential;

use super::traits::{CompletionTarget, UPSTREAM_SERVICE};

/// Build a single-message chat request from an assembled prompt
pub fn to_chat_request(prompt: Prompt) -> ChatRequest {
    ChatRequest::new(vec![GenaiMessage::user(prompt.into_string())])
}

/// Convert a genai stream event into a text fragment
///
/// Only content chunks carry text; start, end and reasoning events are
/// skipped. Callers that need to know the stream finished match `End` first.
pub fn from_genai_event(event: ChatStreamEvent) -> Option<String> {
    match event {
        ChatStreamEvent::Chunk(chunk) => Some(chunk.content),
        _ => None,
    }
}

/// HTTP status carried by a genai error, looking through stream wrappers
fn http_status(err: &genai::Error) -> Option<u16> {
    match err {
        genai::Error::HttpError { status, .. } => Some(status.as_u16()),
        genai::Error::WebStream { error, .. } => {
            error.downcast_ref::<genai::Error>().and_then(http_status)
        }
        genai::Error::WebModelCall { webc_error, .. }
        | genai::Error::WebAdapterCall { webc_error, .. } => match webc_error {
            genai::webc::Error::ResponseFailedStatus { status, .. } => Some(status.as_u16()),
            _ => None,
        },
        _ => None,
    }
}

/// Map a genai error onto the upstream variant
///
/// Status failures read like the buffered client's; everything else is
/// flattened onto one line.
pub fn from_genai_error(err: genai::Error) -> ToolError {
    if let Some(status) = http_status(&err) {
        return ToolError::upstream_status(UPSTREAM_SERVICE, status);
    }
    let message = err
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    ToolError::upstream(message)
}

/// Create a genai Client bound to one OpenAI-compatible endpoint
pub fn create_client(target: &CompletionTarget, credential: &Credential) -> Client {
    let endpoint = target.base_with_slash();
    let key = credential.expose().to_string();

    let target_resolver = ServiceTargetResolver::from_resolver_fn(
        move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
            let ServiceTarget { model, .. } = target;
            Ok(ServiceTarget {
                endpoint: Endpoint::from_owned(endpoint.clone()),
                auth: AuthData::from_single(key.clone()),
                model: ModelIden::new(AdapterKind::OpenAI, model.model_name),
            })
        },
    );

    Client::builder()
        .with_service_target_resolver(target_resolver)
        .build()
}

/// Run `exec_chat_stream` and fail on the opening request only
pub async fn open_chat_stream(
    client: &Client,
    model: &str,
    prompt: Prompt,
) -> ToolResult<genai::chat::ChatStreamResponse> {
    client
        .exec_chat_stream(model, to_chat_request(prompt), None)
        .await
        .map_err(from_genai_error)
}
