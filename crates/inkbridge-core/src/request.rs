//! Request normalization
//!
//! Transport adapters deserialize whatever envelope they receive into a
//! [`RawToolRequest`]; [`normalize`] turns that into a [`ToolRequest`] or a
//! validation error. Content is taken verbatim: no trimming, no escaping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

/// Message used when the query is absent or empty
pub const QUERY_REQUIRED: &str = "query is required";

/// Unvalidated request as received from a transport
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawToolRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

impl RawToolRequest {
    /// Create a raw request carrying only a query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Canonical, validated tool request
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    /// Never empty
    pub query: String,
    pub code: Option<String>,
    pub context: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl ToolRequest {
    /// Code snippet, empty when absent
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }

    /// Additional context, empty when absent
    pub fn context(&self) -> &str {
        self.context.as_deref().unwrap_or("")
    }
}

impl TryFrom<RawToolRequest> for ToolRequest {
    type Error = ToolError;

    fn try_from(raw: RawToolRequest) -> ToolResult<Self> {
        normalize(raw)
    }
}

/// Validate a raw request
pub fn normalize(raw: RawToolRequest) -> ToolResult<ToolRequest> {
    let query = match raw.query {
        Some(q) if !q.is_empty() => q,
        _ => return Err(ToolError::validation(QUERY_REQUIRED)),
    };

    Ok(ToolRequest {
        query,
        code: raw.code,
        context: raw.context,
        metadata: raw.metadata.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_is_rejected() {
        let err = normalize(RawToolRequest::default()).unwrap_err();
        assert_eq!(err, ToolError::Validation(QUERY_REQUIRED.to_string()));
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let err = normalize(RawToolRequest::new("")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_whitespace_query_is_kept_verbatim() {
        let request = normalize(RawToolRequest::new("  spaced  ")).unwrap();
        assert_eq!(request.query, "  spaced  ");
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let request = normalize(RawToolRequest::new("how to airdrop tokens")).unwrap();
        assert_eq!(request.code, None);
        assert_eq!(request.context, None);
        assert_eq!(request.code(), "");
        assert_eq!(request.context(), "");
        assert!(request.metadata.is_empty());
    }

    #[test]
    fn test_fields_pass_through() {
        let mut metadata = HashMap::new();
        metadata.insert("user".to_string(), "u-1".to_string());

        let raw = RawToolRequest::new("q")
            .with_code("let x = 1;\n")
            .with_context("ctx")
            .with_metadata(metadata.clone());
        let request = ToolRequest::try_from(raw).unwrap();

        assert_eq!(request.code(), "let x = 1;\n");
        assert_eq!(request.context(), "ctx");
        assert_eq!(request.metadata, metadata);
    }

    #[test]
    fn test_deserialize_from_json() {
        let raw: RawToolRequest = serde_json::from_str(
            r#"{"query":"q","code":null,"metadata":{"k":"v"}}"#,
        )
        .unwrap();
        assert_eq!(raw.query.as_deref(), Some("q"));
        assert_eq!(raw.code, None);
        assert_eq!(raw.metadata.unwrap().get("k").map(String::as_str), Some("v"));
    }
}
