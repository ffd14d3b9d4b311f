//! In-memory and no-op sinks

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::traits::{TelemetryRecord, TelemetrySink};

/// A sink that drops every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpTelemetrySink;

#[async_trait]
impl TelemetrySink for NoOpTelemetrySink {
    fn name(&self) -> &str {
        "noop"
    }

    async fn log(&self, _record: TelemetryRecord) {}
}

/// Collects records so tests can await and inspect them
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use inkbridge_core::telemetry::{MemoryTelemetrySink, TelemetryRecord, TelemetrySink};
///
/// # tokio_test_block(async {
/// let sink = MemoryTelemetrySink::new();
/// sink.log(TelemetryRecord::new("q", "a", "test", &HashMap::new())).await;
/// assert_eq!(sink.len(), 1);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryTelemetrySink {
    records: Mutex<Vec<TelemetryRecord>>,
    notify: Notify,
}

impl MemoryTelemetrySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait until at least `count` records arrived; false on timeout
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let notified = self.notify.notified();
            if self.len() >= count {
                return true;
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.len() >= count;
            }
        }
    }
}

#[async_trait]
impl TelemetrySink for MemoryTelemetrySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn log(&self, record: TelemetryRecord) {
        self.records.lock().push(record);
        self.notify.notify_waiters();
    }
}
