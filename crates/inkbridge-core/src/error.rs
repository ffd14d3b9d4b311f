//! Tool invocation error types

use thiserror::Error;

/// Errors surfaced to the caller of a tool invocation
///
/// Telemetry failures use [`crate::telemetry::TelemetryError`] and never
/// reach this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Bad or missing input; never reaches the network
    #[error("{0}")]
    Validation(String),

    /// Missing credential or unusable configuration; never reaches the network
    #[error("{0}")]
    Configuration(String),

    /// Non-success status or transport failure from an upstream service
    #[error("{message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}

impl ToolError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error for an absent credential
    pub fn missing_credential(key: &str) -> Self {
        Self::Configuration(format!(
            "Missing API key. Please set the {} environment variable.",
            key
        ))
    }

    /// Create an upstream error from a non-success HTTP status
    pub fn upstream_status(service: &str, status: u16) -> Self {
        Self::Upstream {
            status: Some(status),
            message: format!("{} error: {}", service, status),
        }
    }

    /// Create an upstream error without a status (transport or stream failure)
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_message() {
        let err = ToolError::upstream_status("Inkeep API", 502);
        assert_eq!(err.to_string(), "Inkeep API error: 502");
        assert!(err.is_upstream());
        assert!(matches!(err, ToolError::Upstream { status: Some(502), .. }));
    }

    #[test]
    fn test_missing_credential_names_the_key() {
        let err = ToolError::missing_credential("INKEEP_API_KEY");
        assert!(err.is_configuration());
        assert!(err.to_string().contains("INKEEP_API_KEY"));
    }

    #[test]
    fn test_validation_displays_message_verbatim() {
        let err = ToolError::validation("query is required");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "query is required");
    }
}
