//! Stdio MCP tool server
//!
//! Registers `solana_development_tool` (backed by a [`ToolInvoker`]) and
//! `jina_reader` (backed by a [`ReaderClient`]). Every outcome, failures
//! included, is returned as a single text content block.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo,
    },
    schemars,
    service::{RequestContext, RoleServer},
    tool, tool_router, ErrorData, ServerHandler,
};
use serde::Deserialize;
use tracing::info;

use inkbridge_core::providers::CompletionMode;
use inkbridge_core::telemetry::STDIO_SOURCE;
use inkbridge_core::{
    Logger, ProxyConfig, RawToolRequest, ReaderClient, RemoteToolInvoker, SecretStore,
    ToolInvocationProxy, ToolInvoker, ToolResponse,
};

pub const SOLANA_TOOL: &str = "solana_development_tool";
pub const READER_TOOL: &str = "jina_reader";

// ============================================================================
// Tool parameters
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct SolanaToolOptions {
    #[serde(rename = "maxResults")]
    #[schemars(description = "Maximum number of results to return")]
    pub max_results: Option<f64>,

    #[schemars(description = "Additional metadata to include with the request")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SolanaToolRequest {
    #[schemars(description = "Search query to find relevant resources or code question related to Solana")]
    pub query: String,

    #[schemars(description = "Code snippet to analyze or debug, will be preserved with proper formatting")]
    pub code: Option<String>,

    #[schemars(description = "Additional context or conversation history to consider when finding resources")]
    pub context: Option<String>,

    #[schemars(description = "Optional parameters for the request")]
    pub options: Option<SolanaToolOptions>,
}

impl From<SolanaToolRequest> for RawToolRequest {
    /// `maxResults` is accepted for compatibility and not forwarded
    fn from(req: SolanaToolRequest) -> Self {
        RawToolRequest {
            query: Some(req.query),
            code: req.code,
            context: req.context,
            metadata: req.options.and_then(|o| o.metadata),
        }
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct ReaderRequest {
    #[schemars(description = "The URL to extract content from (e.g., https://example.com)")]
    pub url: String,
}

fn text_result(response: ToolResponse) -> CallToolResult {
    CallToolResult::success(vec![Content::text(response.into_text())])
}

// ============================================================================
// Server
// ============================================================================

/// MCP server state
#[derive(Clone)]
pub struct InkbridgeServer {
    invoker: Arc<dyn ToolInvoker>,
    reader: Arc<ReaderClient>,
    tool_router: ToolRouter<Self>,
}

impl InkbridgeServer {
    pub fn new(invoker: Arc<dyn ToolInvoker>, reader: Arc<ReaderClient>) -> Self {
        Self {
            invoker,
            reader,
            tool_router: Self::tool_router(),
        }
    }

    /// Local pipeline, or a relay to `relay.url` when configured
    pub fn from_config(
        config: &ProxyConfig,
        store: &dyn SecretStore,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let invoker: Arc<dyn ToolInvoker> = match &config.relay.url {
            Some(url) => {
                info!(%url, "Relaying {} to remote worker", SOLANA_TOOL);
                Arc::new(RemoteToolInvoker::new(url.clone(), Arc::clone(&logger)))
            }
            None => Arc::new(ToolInvocationProxy::from_config(
                config,
                store,
                CompletionMode::Streamed,
                STDIO_SOURCE,
                Arc::clone(&logger),
            )),
        };
        let reader = Arc::new(ReaderClient::from_config(&config.reader, store, logger));
        Self::new(invoker, reader)
    }
}

#[tool_router]
impl InkbridgeServer {
    #[tool(
        name = "solana_development_tool",
        description = "Use this tool for ALL Solana blockchain development related questions. Searches for and provides relevant resources related to Solana development."
    )]
    async fn solana_development_tool(
        &self,
        Parameters(req): Parameters<SolanaToolRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(self.invoker.respond(req.into()).await))
    }

    #[tool(
        name = "jina_reader",
        description = "Use this tool to extract the content from a URL using JINA's reader API. It returns the LLM-parsed text from the URL."
    )]
    async fn jina_reader(
        &self,
        Parameters(req): Parameters<ReaderRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(self.reader.respond(&req.url).await))
    }
}

impl ServerHandler for InkbridgeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "solana".into(),
                title: Some("Solana development resources".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Finds Solana documentation, guides and code resources, and reads web pages as LLM-ready text.".into(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        }))
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            tracing::debug!(tool = %request.name, "call_tool");
            let ctx = ToolCallContext::new(self, request, context);
            self.tool_router.call(ctx).await
        }
    }
}
