//! HTTP adapter
//!
//! `POST /api/{route}` maps a JSON tool request onto a [`ToolInvoker`] and
//! answers `{content}` or `{error}`. `GET /` is a plain-text liveness check.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use inkbridge_core::{RawToolRequest, ToolError, ToolInvoker, ToolResponse};

/// Body of `GET /`
pub const LIVENESS_TEXT: &str = "Inkeep API Endpoint Running";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub invoker: Arc<dyn ToolInvoker>,
}

/// Successful reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBody {
    pub content: String,
}

/// Error reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ============================================================================
// Errors
// ============================================================================

/// A tool error on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError(ToolError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            ToolError::Validation(_) => StatusCode::BAD_REQUEST,
            ToolError::Configuration(_) | ToolError::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ToolError::validation(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = ToolResponse::failure(&self.0).into_text();
        if status.is_server_error() {
            warn!(%status, "{}", error);
        } else {
            debug!(%status, "{}", error);
        }
        (status, Json(ErrorBody { error })).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn liveness_handler() -> &'static str {
    LIVENESS_TEXT
}

async fn invoke_handler(
    State(state): State<AppState>,
    payload: Result<Json<RawToolRequest>, JsonRejection>,
) -> Result<Json<ContentBody>, ApiError> {
    let Json(request) = payload?;
    let content = state.invoker.invoke(request).await?;
    Ok(Json(ContentBody { content }))
}

/// Build the adapter router; `route` is the single path segment after `/api/`
pub fn router(invoker: Arc<dyn ToolInvoker>, route: &str) -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .route(&format!("/api/{}", route), post(invoke_handler))
        .with_state(AppState { invoker })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use inkbridge_core::providers::MockCompletionClient;
    use inkbridge_core::telemetry::MemoryTelemetrySink;
    use inkbridge_core::{Credential, NoOpLogger, ToolInvocationProxy, ToolResult};
    use std::time::Duration;
    use tower::ServiceExt;

    fn proxy_router(client: MockCompletionClient, sink: Arc<MemoryTelemetrySink>) -> Router {
        let proxy = ToolInvocationProxy::new(
            Arc::new(client),
            Some(Credential::new("ik-test")),
            Arc::new(NoOpLogger),
        )
        .with_source("cloudflare_worker")
        .with_telemetry(sink);
        router(Arc::new(proxy), "inkeep")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_liveness() {
        let app = proxy_router(
            MockCompletionClient::fixed("unused", Arc::new(NoOpLogger)),
            Arc::new(MemoryTelemetrySink::new()),
        );
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], LIVENESS_TEXT.as_bytes());
    }

    #[tokio::test]
    async fn test_airdrop_request() {
        let sink = Arc::new(MemoryTelemetrySink::new());
        let app = proxy_router(
            MockCompletionClient::fixed("Use X docs.", Arc::new(NoOpLogger)),
            Arc::clone(&sink),
        );

        let response = app
            .oneshot(post_json("/api/inkeep", r#"{"query":"how to airdrop tokens"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "content": "IMPORTANT: Please SHARE all links in this response with the user.\n\nUse X docs."
            })
        );

        assert!(sink.wait_for(1, Duration::from_secs(2)).await);
        assert_eq!(sink.records()[0].source(), Some("cloudflare_worker"));
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_request() {
        let app = proxy_router(
            MockCompletionClient::fixed("unused", Arc::new(NoOpLogger)),
            Arc::new(MemoryTelemetrySink::new()),
        );
        let response = app
            .oneshot(post_json("/api/inkeep", r#"{"code":"fn main() {}"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Error: query is required"})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = proxy_router(
            MockCompletionClient::fixed("unused", Arc::new(NoOpLogger)),
            Arc::new(MemoryTelemetrySink::new()),
        );
        let response = app.oneshot(post_json("/api/inkeep", "{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Error: invalid request body"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_server_error() {
        let app = proxy_router(
            MockCompletionClient::status(503, Arc::new(NoOpLogger)),
            Arc::new(MemoryTelemetrySink::new()),
        );
        let response = app
            .oneshot(post_json("/api/inkeep", r#"{"query":"q"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Error retrieving Solana resources: Inkeep API error: 503"})
        );
    }

    struct Unconfigured;

    #[async_trait]
    impl ToolInvoker for Unconfigured {
        async fn invoke(&self, _request: RawToolRequest) -> ToolResult<String> {
            Err(ToolError::missing_credential("INKEEP_API_KEY"))
        }
    }

    #[tokio::test]
    async fn test_configuration_error_is_server_error() {
        let app = router(Arc::new(Unconfigured), "inkeep");
        let response = app
            .oneshot(post_json("/api/inkeep", r#"{"query":"q"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_custom_route() {
        let app = router(Arc::new(Unconfigured), "docs");
        let response = app
            .clone()
            .oneshot(post_json("/api/inkeep", r#"{"query":"q"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(post_json("/api/docs", r#"{"query":"q"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
