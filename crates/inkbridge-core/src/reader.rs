//! URL reader client
//!
//! Fetches LLM-ready text for a web page from a reader service
//! (`GET {api_base}/{url-encoded url}`). No telemetry is recorded.

use std::sync::Arc;

use crate::config::ReaderConfig;
use crate::error::{ToolError, ToolResult};
use crate::logging::Logger;
use crate::response::ToolResponse;
use crate::secrets::{Credential, SecretStore};
use crate::{log_debug, log_warn};

/// Message used when the url is absent or empty
pub const URL_REQUIRED: &str = "url is required";

/// Client for the reader API
pub struct ReaderClient {
    api_base: String,
    credential: Option<Credential>,
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl ReaderClient {
    pub fn new(
        api_base: impl Into<String>,
        credential: Option<Credential>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            credential,
            http: reqwest::Client::new(),
            logger,
        }
    }

    /// Build from configuration, resolving the credential once
    pub fn from_config(config: &ReaderConfig, store: &dyn SecretStore, logger: Arc<dyn Logger>) -> Self {
        let credential = Credential::resolve(store, &config.credential_key);
        Self::new(config.api_base.clone(), credential, logger)
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Reader URL for a target page
    pub fn reader_url(&self, url: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(url)
        )
    }

    /// Fetch the page text
    pub async fn read(&self, url: &str) -> ToolResult<String> {
        let credential = self
            .credential
            .as_ref()
            .ok_or_else(|| ToolError::Configuration("Missing JINA API key.".to_string()))?;
        if url.is_empty() {
            return Err(ToolError::validation(URL_REQUIRED));
        }

        let reader_url = self.reader_url(url);
        log_debug!(self.logger, "[ReaderClient] GET {}", reader_url);

        let response = self
            .http
            .get(&reader_url)
            .header(reqwest::header::AUTHORIZATION, credential.bearer())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Upstream {
                status: Some(status.as_u16()),
                message: format!("JINA reader API returned status {}", status.as_u16()),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch the page text, rendering failures as user-visible text
    pub async fn respond(&self, url: &str) -> ToolResponse {
        match self.read(url).await {
            Ok(text) => ToolResponse::Text(text),
            Err(ToolError::Upstream { message, .. }) => {
                log_warn!(self.logger, "[ReaderClient] {}", message);
                ToolResponse::Error(format!(
                    "Error fetching content from JINA reader API: {}",
                    message
                ))
            }
            Err(err) => ToolResponse::failure(&err),
        }
    }
}
