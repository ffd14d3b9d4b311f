//! Proxy configuration
//!
//! Every field has a default, so an absent or partial YAML file is valid.
//! The credential itself is never stored here, only the key it is read from.

mod file;

use serde::{Deserialize, Serialize};

use crate::providers::CompletionMode;

pub use file::{user_config_path, ConfigError, ConfigResult};

pub const DEFAULT_COMPLETION_API_BASE: &str = "https://api.inkeep.com/v1";
pub const DEFAULT_MODEL: &str = "inkeep-qa-sonnet-3-5";
pub const DEFAULT_ANALYTICS_ENDPOINT: &str = "https://api.analytics.inkeep.com/conversations";
pub const DEFAULT_CREDENTIAL_KEY: &str = "INKEEP_API_KEY";
pub const DEFAULT_READER_API_BASE: &str = "https://r.jina.ai";
pub const DEFAULT_READER_CREDENTIAL_KEY: &str = "JINA_API_KEY";
pub const DEFAULT_BIND: &str = "0.0.0.0:8787";
pub const DEFAULT_ROUTE: &str = "inkeep";

/// Top-level configuration shared by both binaries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub completion: CompletionConfig,
    pub analytics: AnalyticsConfig,
    pub credential: CredentialConfig,
    pub reader: ReaderConfig,
    pub http: HttpConfig,
    pub relay: RelayConfig,
}

/// Upstream completion API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// OpenAI-compatible base URL, without the `/chat/completions` suffix
    pub api_base: String,
    pub model: String,
    /// Unset means the binary's own default
    pub mode: Option<CompletionMode>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_COMPLETION_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            mode: None,
        }
    }
}

impl CompletionConfig {
    pub fn mode_or(&self, default: CompletionMode) -> CompletionMode {
        self.mode.unwrap_or(default)
    }
}

/// Analytics (telemetry) endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub endpoint: String,
    pub enabled: bool,
    /// `source` property on every record; unset means the binary's own tag
    pub source: Option<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ANALYTICS_ENDPOINT.to_string(),
            enabled: true,
            source: None,
        }
    }
}

impl AnalyticsConfig {
    pub fn source_or(&self, default: &str) -> String {
        self.source.clone().unwrap_or_else(|| default.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// Secret store key holding the completion/analytics API key
    pub key: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_CREDENTIAL_KEY.to_string(),
        }
    }
}

/// URL reader tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub api_base: String,
    pub credential_key: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_READER_API_BASE.to_string(),
            credential_key: DEFAULT_READER_CREDENTIAL_KEY.to_string(),
        }
    }
}

/// HTTP adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    /// Path segment after `/api/`
    pub route: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            route: DEFAULT_ROUTE.to_string(),
        }
    }
}

/// Relay mode: forward stdio tool calls to a deployed HTTP adapter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub url: Option<String>,
}

impl ProxyConfig {
    /// Reject values that would only fail later, on the request path
    pub fn validate(&self) -> ConfigResult<()> {
        if self.completion.api_base.trim().is_empty() {
            return Err(ConfigError::Invalid("completion.api_base is empty".to_string()));
        }
        if self.completion.model.trim().is_empty() {
            return Err(ConfigError::Invalid("completion.model is empty".to_string()));
        }
        if self.credential.key.trim().is_empty() {
            return Err(ConfigError::Invalid("credential.key is empty".to_string()));
        }
        if self.http.route.is_empty() || self.http.route.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "http.route must be a single path segment, got {:?}",
                self.http.route
            )));
        }
        if self.analytics.enabled && self.analytics.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "analytics.endpoint is empty while analytics is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.completion.api_base, DEFAULT_COMPLETION_API_BASE);
        assert_eq!(config.completion.model, "inkeep-qa-sonnet-3-5");
        assert_eq!(config.completion.mode_or(CompletionMode::Streamed), CompletionMode::Streamed);
        assert!(config.analytics.enabled);
        assert_eq!(config.analytics.source_or("mcp_tool"), "mcp_tool");
        assert_eq!(config.credential.key, "INKEEP_API_KEY");
        assert_eq!(config.http.route, "inkeep");
        assert!(config.relay.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_route() {
        let mut config = ProxyConfig::default();
        config.http.route = "api/inkeep".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_disabled_analytics_may_have_no_endpoint() {
        let mut config = ProxyConfig::default();
        config.analytics.enabled = false;
        config.analytics.endpoint.clear();
        assert!(config.validate().is_ok());
    }
}
