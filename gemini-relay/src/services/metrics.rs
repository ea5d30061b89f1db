//! Prometheus metrics for the relay.
//!
//! HTTP request metrics come from `service_core::middleware::metrics_middleware`;
//! this module adds per-upstream call metrics and owns the exporter handle.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder once and return its handle.
///
/// If another recorder already owns the process (several apps spawned in one
/// test binary), a detached recorder is used so `/metrics` still renders.
pub fn init_metrics() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(error = %e, "Prometheus recorder not installed; using detached handle");
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Gemini,
    Telegram,
}

impl Upstream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Upstream::Gemini => "gemini",
            Upstream::Telegram => "telegram",
        }
    }
}

/// Record one outbound call. `outcome` is a short stable label such as
/// `success`, `http_error`, `timeout` or `network_error`.
pub fn record_upstream_call(upstream: Upstream, outcome: &'static str, elapsed: Duration) {
    counter!(
        "relay_upstream_requests_total",
        "upstream" => upstream.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "relay_upstream_request_duration_seconds",
        "upstream" => upstream.as_str()
    )
    .record(elapsed.as_secs_f64());
}
