//! Telemetry sidecar
//!
//! Records each successful exchange to an analytics service. Sinks run on a
//! detached task and report their own failures through the logger; nothing
//! here can change a tool response.

mod traits;
mod analytics;
mod memory;

pub use traits::{
    TelemetryError, TelemetryRecord, TelemetryResult, TelemetrySink, SOURCE_PROPERTY,
};
pub use analytics::AnalyticsClient;
pub use memory::{MemoryTelemetrySink, NoOpTelemetrySink};

/// Source tag used by the HTTP adapter
pub const HTTP_SOURCE: &str = "cloudflare_worker";

/// Source tag used by the stdio tool server
pub const STDIO_SOURCE: &str = "mcp_tool";
