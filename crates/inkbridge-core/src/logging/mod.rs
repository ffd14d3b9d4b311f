//! Logging abstractions
//!
//! Library code logs through `Arc<dyn Logger>` so each binary decides where
//! diagnostics go; the stdio server must keep stdout free for the protocol.

mod traits;
mod noop;
mod console;
mod tracing_logger;

pub use traits::Logger;
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use tracing_logger::TracingLogger;
