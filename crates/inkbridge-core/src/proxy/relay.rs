//! RemoteToolInvoker - forward invocations to a deployed HTTP adapter
//!
//! The remote side runs the full pipeline, telemetry included, so this
//! invoker only validates locally and maps the `{content}` envelope back.
//! Upstream failures are shown to the caller as the bare worker message.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};
use crate::logging::Logger;
use crate::request::{normalize, RawToolRequest};
use crate::response::{ToolResponse, NO_RESOURCES_FALLBACK};
use crate::{log_debug, log_error};

use super::traits::ToolInvoker;

#[derive(Debug, Serialize)]
struct RelayBody<'a> {
    query: &'a str,
    code: &'a str,
    context: &'a str,
    #[serde(skip_serializing_if = "no_metadata")]
    metadata: &'a HashMap<String, String>,
}

fn no_metadata(metadata: &&HashMap<String, String>) -> bool {
    metadata.is_empty()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RelayReply {
    content: Option<String>,
}

/// Invoker that relays to `POST {url}` on a remote HTTP adapter
pub struct RemoteToolInvoker {
    url: String,
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl RemoteToolInvoker {
    pub fn new(url: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
            logger,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ToolInvoker for RemoteToolInvoker {
    async fn invoke(&self, request: RawToolRequest) -> ToolResult<String> {
        let request = normalize(request)?;
        let body = RelayBody {
            query: &request.query,
            code: request.code(),
            context: request.context(),
            metadata: &request.metadata,
        };

        log_debug!(self.logger, "[RemoteToolInvoker] POST {}", self.url);
        let response = self.http.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            log_error!(self.logger, "[RemoteToolInvoker] worker returned {}: {}", status, text);
            return Err(ToolError::Upstream {
                status: Some(status.as_u16()),
                message: format!("Worker error: {} - {}", status.as_u16(), text),
            });
        }

        let reply: RelayReply = response
            .json()
            .await
            .map_err(|e| ToolError::upstream(format!("Invalid worker response: {}", e)))?;

        Ok(reply
            .content
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| NO_RESOURCES_FALLBACK.to_string()))
    }

    async fn respond(&self, request: RawToolRequest) -> ToolResponse {
        match self.invoke(request).await {
            Err(ToolError::Upstream { message, .. }) => ToolResponse::Error(message),
            result => ToolResponse::from(result),
        }
    }
}
