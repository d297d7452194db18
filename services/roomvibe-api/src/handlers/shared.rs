//! Shared handler utilities

use std::time::Instant;

/// Record operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "entitlement_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

/// Count a refused PDF export by reason
#[inline]
pub fn record_pdf_rejection(reason: &'static str) {
    metrics::counter!("pdf_export_rejections_total", "reason" => reason).increment(1);
}
