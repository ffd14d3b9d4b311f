//! Inkbridge Core
//!
//! Transport-agnostic tool-invocation proxy with decoupled telemetry.
//! This crate provides the pipeline shared by the HTTP adapter and the
//! stdio tool server: request normalization, prompt assembly, completion
//! (buffered or streamed), response post-processing, and a fire-and-forget
//! analytics sidecar.
//!
//! ## Pipeline
//!
//! ```rust,ignore
//! use inkbridge_core::{ProxyConfig, EnvSecretStore, ToolInvocationProxy, ToolInvoker};
//! use inkbridge_core::providers::CompletionMode;
//!
//! let proxy = ToolInvocationProxy::from_config(
//!     &ProxyConfig::default(),
//!     &EnvSecretStore::new(),
//!     CompletionMode::Buffered,
//!     "cloudflare_worker",
//!     logger,
//! );
//!
//! let response = proxy.respond(RawToolRequest::new("how to airdrop tokens")).await;
//! ```

pub mod error;
pub mod types;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod request;
pub mod prompt;
pub mod response;
pub mod providers;
pub mod telemetry;
pub mod proxy;
pub mod reader;

// Re-export commonly used types
pub use error::{ToolError, ToolResult};

pub use request::{normalize, RawToolRequest, ToolRequest};
pub use prompt::{assemble, Prompt};
pub use response::{post_process, Completion, ToolResponse};

pub use secrets::{
    Credential, SecretStore, SecretStoreError, SecretStoreResult,
    EnvSecretStore, MemorySecretStore,
};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, TracingLogger};

pub use config::{ProxyConfig, ConfigError, ConfigResult};

pub use providers::{CompletionClient, CompletionMode, CompletionTarget};

pub use telemetry::{TelemetryRecord, TelemetrySink, TelemetryError};

pub use proxy::{ToolInvoker, ToolInvocationProxy, RemoteToolInvoker};

pub use reader::ReaderClient;
