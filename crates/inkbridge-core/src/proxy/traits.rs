//! Tool invoker trait

use async_trait::async_trait;

use crate::error::ToolResult;
use crate::request::RawToolRequest;
use crate::response::ToolResponse;

/// Entry point shared by every transport adapter
///
/// Implementations:
/// - `ToolInvocationProxy`: validates, completes, post-processes, logs telemetry
/// - `RemoteToolInvoker`: forwards to a deployed HTTP adapter
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Run one invocation to its final text
    async fn invoke(&self, request: RawToolRequest) -> ToolResult<String>;

    /// Run one invocation and render errors as user-visible text
    async fn respond(&self, request: RawToolRequest) -> ToolResponse {
        ToolResponse::from(self.invoke(request).await)
    }
}
