//! Completion client implementations
//!
//! Two interchangeable clients behind [`CompletionClient`]:
//! - `HttpCompletionClient`: one buffered OpenAI-style request via reqwest
//! - `GenaiCompletionClient`: streamed via the `genai` crate, routed to the
//!   configured endpoint with a `ServiceTargetResolver`
//!
//! The `MockCompletionClient` is kept for testing purposes.

mod traits;
mod genai_adapter;
mod genai_provider;
mod http_provider;
mod mock;

pub use traits::{collect_fragments, CompletionClient, CompletionMode, CompletionTarget, FragmentStream};

pub use genai_provider::GenaiCompletionClient;
pub use http_provider::HttpCompletionClient;

// Mock client for testing
pub use mock::{MockCompletionClient, MockMode};

use crate::logging::Logger;
use std::sync::Arc;

/// Create a completion client for the given mode
pub fn create_completion_client(
    mode: CompletionMode,
    target: CompletionTarget,
    logger: Arc<dyn Logger>,
) -> Arc<dyn CompletionClient> {
    match mode {
        CompletionMode::Buffered => Arc::new(HttpCompletionClient::new(target, logger)),
        CompletionMode::Streamed => Arc::new(GenaiCompletionClient::new(target, logger)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_factory_selects_by_mode() {
        let target = CompletionTarget::new("https://api.inkeep.com/v1", "inkeep-qa-sonnet-3-5");
        let buffered =
            create_completion_client(CompletionMode::Buffered, target.clone(), Arc::new(NoOpLogger));
        let streamed = create_completion_client(CompletionMode::Streamed, target, Arc::new(NoOpLogger));
        assert_eq!(buffered.name(), "http");
        assert_eq!(buffered.mode(), CompletionMode::Buffered);
        assert_eq!(streamed.name(), "genai");
        assert_eq!(streamed.mode(), CompletionMode::Streamed);
    }
}
