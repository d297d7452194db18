//! Prometheus recorder setup
//!
//! The global recorder can be installed once per process. The handle is kept
//! in a `OnceLock` so repeated setup returns the same handle instead of
//! failing on the second install.

use std::sync::OnceLock;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the recorder if needed and return its handle
pub fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    if let Some(handle) = HANDLE.get() {
        return Ok(handle.clone());
    }

    // Entitlement checks are a DB count at most; anything past 200ms is slow
    let latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.2, 0.5, 1.0, 2.5];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("entitlement_operation_duration_seconds".to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    metrics::describe_counter!(
        "pdf_exports_recorded_total",
        "Total PDF exports recorded against monthly quotas"
    );
    metrics::describe_counter!(
        "pdf_export_rejections_total",
        "PDF exports refused, by reason"
    );
    metrics::describe_counter!(
        "feature_gate_rejections_total",
        "Requests refused by a disabled feature gate, by feature"
    );
    metrics::describe_histogram!(
        "entitlement_operation_duration_seconds",
        "Entitlement and usage operation latency in seconds by operation type"
    );

    Ok(HANDLE.get_or_init(|| handle).clone())
}
