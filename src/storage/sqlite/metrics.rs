//! Metrics recording for store operations.
//!
//! Each operation records `storage_operations_total` (counter) and
//! `storage_operation_duration_ms` (histogram), labelled by table, operation
//! and outcome. Without an installed recorder both are no-ops.

use std::time::Instant;

/// Times one store operation from creation until [`OperationTimer::finish`].
#[derive(Debug)]
pub struct OperationTimer {
    entity: &'static str,
    operation: &'static str,
    started: Instant,
}

impl OperationTimer {
    /// Starts timing `operation` on the `entity` table.
    #[must_use]
    pub fn start(entity: &'static str, operation: &'static str) -> Self {
        Self {
            entity,
            operation,
            started: Instant::now(),
        }
    }

    /// Records the count and latency with a `success` or `error` status.
    pub fn finish(self, succeeded: bool) {
        let status = if succeeded { "success" } else { "error" };
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        metrics::counter!(
            "storage_operations_total",
            "entity" => self.entity,
            "operation" => self.operation,
            "status" => status
        )
        .increment(1);
        metrics::histogram!(
            "storage_operation_duration_ms",
            "entity" => self.entity,
            "operation" => self.operation,
            "status" => status
        )
        .record(elapsed_ms);
    }
}
