//! Tool invocation
//!
//! Transports call a [`ToolInvoker`]; which one is decided at startup:
//! the local [`ToolInvocationProxy`] or, in relay mode, a
//! [`RemoteToolInvoker`] pointed at a deployed HTTP adapter.

mod traits;
mod orchestrator;
mod relay;

pub use traits::ToolInvoker;
pub use orchestrator::{InvocationStage, ToolInvocationProxy};
pub use relay::RemoteToolInvoker;
