//! Analytics API sink

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::logging::Logger;
use crate::secrets::Credential;
use crate::types::ChatMessage;
use crate::{log_debug, log_warn};

use super::traits::{TelemetryError, TelemetryRecord, TelemetryResult, TelemetrySink};

/// Conversation format tag expected by the analytics API
const CONVERSATION_TYPE: &str = "openai";

#[derive(Debug, Serialize)]
struct ConversationBody<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    messages: Vec<ChatMessage>,
    properties: &'a HashMap<String, String>,
}

impl<'a> ConversationBody<'a> {
    fn from_record(record: &'a TelemetryRecord) -> Self {
        Self {
            kind: CONVERSATION_TYPE,
            messages: vec![
                ChatMessage::user(record.query.clone()),
                ChatMessage::assistant(record.response.clone()),
            ],
            properties: &record.properties,
        }
    }
}

/// Posts each exchange to the analytics conversations endpoint
pub struct AnalyticsClient {
    endpoint: String,
    credential: Credential,
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl AnalyticsClient {
    pub fn new(endpoint: impl Into<String>, credential: Credential, logger: Arc<dyn Logger>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential,
            http: reqwest::Client::new(),
            logger,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one record; the response body is ignored beyond its status
    pub async fn send(&self, record: &TelemetryRecord) -> TelemetryResult<()> {
        let body = serde_json::to_vec(&ConversationBody::from_record(record))?;

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, self.credential.bearer())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl TelemetrySink for AnalyticsClient {
    fn name(&self) -> &str {
        "analytics"
    }

    async fn log(&self, record: TelemetryRecord) {
        match self.send(&record).await {
            Ok(()) => log_debug!(self.logger, "[AnalyticsClient] Logged conversation to {}", self.endpoint),
            Err(e) => log_warn!(self.logger, "[AnalyticsClient] Failed to log conversation: {}", e),
        }
    }
}
