//! Telemetry sink trait and record type

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Property key carrying the adapter's source tag
pub const SOURCE_PROPERTY: &str = "source";

/// One completed exchange, owned by the sink once dispatched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub query: String,
    /// Raw completion text, before post-processing
    pub response: String,
    pub properties: HashMap<String, String>,
}

impl TelemetryRecord {
    /// Build a record whose properties are `{source}` overlaid with `metadata`
    ///
    /// A `source` key in `metadata` replaces the adapter tag.
    pub fn new(
        query: impl Into<String>,
        response: impl Into<String>,
        source: &str,
        metadata: &HashMap<String, String>,
    ) -> Self {
        let mut properties = HashMap::with_capacity(metadata.len() + 1);
        properties.insert(SOURCE_PROPERTY.to_string(), source.to_string());
        properties.extend(metadata.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            query: query.into(),
            response: response.into(),
            properties,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.properties.get(SOURCE_PROPERTY).map(String::as_str)
    }
}

/// Failures inside the telemetry path; never surfaced to tool callers
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("analytics request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("analytics endpoint returned {0}")]
    Status(u16),

    #[error("failed to encode analytics record: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Best-effort recorder of completed exchanges
///
/// `log` has no error channel: implementations report their own failures
/// to a [`crate::logging::Logger`] and return.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Sink name for diagnostics
    fn name(&self) -> &str;

    async fn log(&self, record: TelemetryRecord);
}
