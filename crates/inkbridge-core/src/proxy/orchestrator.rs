//! ToolInvocationProxy - the request pipeline
//!
//! `Validating → Assembling → Completing → PostProcessing → Done`, with an
//! error exit from any stage. Telemetry is dispatched only from `Done`, on a
//! detached task that the response never waits for.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ProxyConfig, DEFAULT_CREDENTIAL_KEY};
use crate::error::{ToolError, ToolResult};
use crate::logging::Logger;
use crate::prompt::assemble;
use crate::providers::{create_completion_client, CompletionClient, CompletionMode, CompletionTarget};
use crate::request::{normalize, RawToolRequest};
use crate::response::post_process;
use crate::secrets::{Credential, SecretStore};
use crate::telemetry::{AnalyticsClient, NoOpTelemetrySink, TelemetryRecord, TelemetrySink, STDIO_SOURCE};
use crate::{log_debug, log_info, log_warn};

use super::traits::ToolInvoker;

/// Pipeline stage, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStage {
    Validating,
    Assembling,
    Completing,
    PostProcessing,
    Done,
}

impl fmt::Display for InvocationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationStage::Validating => "validating",
            InvocationStage::Assembling => "assembling",
            InvocationStage::Completing => "completing",
            InvocationStage::PostProcessing => "post_processing",
            InvocationStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Orchestrates one tool invocation end to end
///
/// Holds only immutable shared state, so one instance serves any number of
/// concurrent invocations.
pub struct ToolInvocationProxy {
    client: Arc<dyn CompletionClient>,
    telemetry: Arc<dyn TelemetrySink>,
    credential: Option<Credential>,
    credential_key: String,
    source: String,
    logger: Arc<dyn Logger>,
}

impl ToolInvocationProxy {
    /// Create a proxy with no telemetry and the stdio source tag
    pub fn new(
        client: Arc<dyn CompletionClient>,
        credential: Option<Credential>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            client,
            telemetry: Arc::new(NoOpTelemetrySink),
            credential,
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            source: STDIO_SOURCE.to_string(),
            logger,
        }
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Key named in the missing-credential error
    pub fn with_credential_key(mut self, key: impl Into<String>) -> Self {
        self.credential_key = key.into();
        self
    }

    /// `source` property attached to telemetry records
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Build the full pipeline from configuration
    ///
    /// The credential is resolved here, once. Telemetry is a no-op when
    /// analytics is disabled or the credential is absent.
    pub fn from_config(
        config: &ProxyConfig,
        store: &dyn SecretStore,
        default_mode: CompletionMode,
        default_source: &str,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let mode = config.completion.mode_or(default_mode);
        let target = CompletionTarget::from(&config.completion);
        let credential = Credential::resolve(store, &config.credential.key);

        log_info!(
            logger,
            "[ToolInvocationProxy] mode={} model={} store={} credential={}",
            mode,
            target.model,
            store.name(),
            if credential.is_some() { "present" } else { "missing" }
        );

        let telemetry: Arc<dyn TelemetrySink> = match (&credential, config.analytics.enabled) {
            (Some(credential), true) => Arc::new(AnalyticsClient::new(
                config.analytics.endpoint.clone(),
                credential.clone(),
                Arc::clone(&logger),
            )),
            _ => Arc::new(NoOpTelemetrySink),
        };

        let client = create_completion_client(mode, target, Arc::clone(&logger));

        Self::new(client, credential, logger)
            .with_telemetry(telemetry)
            .with_credential_key(config.credential.key.clone())
            .with_source(config.analytics.source_or(default_source))
    }

    pub fn client(&self) -> &Arc<dyn CompletionClient> {
        &self.client
    }

    pub fn telemetry(&self) -> &Arc<dyn TelemetrySink> {
        &self.telemetry
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    fn enter(&self, stage: InvocationStage) {
        log_debug!(self.logger, "[ToolInvocationProxy] stage={}", stage);
    }

    fn fail(&self, stage: InvocationStage, err: ToolError) -> ToolError {
        log_warn!(self.logger, "[ToolInvocationProxy] failed while {}: {}", stage, err);
        err
    }

    /// Hand the record to the sink on a detached task
    fn dispatch_telemetry(&self, record: TelemetryRecord) {
        let sink = Arc::clone(&self.telemetry);
        tokio::spawn(async move {
            sink.log(record).await;
        });
    }
}

#[async_trait]
impl ToolInvoker for ToolInvocationProxy {
    async fn invoke(&self, request: RawToolRequest) -> ToolResult<String> {
        self.enter(InvocationStage::Validating);
        let request = normalize(request).map_err(|e| self.fail(InvocationStage::Validating, e))?;

        self.enter(InvocationStage::Assembling);
        let prompt = assemble(&request);

        self.enter(InvocationStage::Completing);
        let credential = self.credential.as_ref().ok_or_else(|| {
            self.fail(
                InvocationStage::Completing,
                ToolError::missing_credential(&self.credential_key),
            )
        })?;
        let completion = self
            .client
            .complete(prompt, credential)
            .await
            .map_err(|e| self.fail(InvocationStage::Completing, e))?;

        self.enter(InvocationStage::PostProcessing);
        let text = post_process(&completion.text);

        self.enter(InvocationStage::Done);
        self.dispatch_telemetry(TelemetryRecord::new(
            request.query,
            completion.text,
            &self.source,
            &request.metadata,
        ));

        Ok(text)
    }
}
