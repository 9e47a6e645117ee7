//! Prometheus metrics exporter.
//!
//! Per-route request counters and latency histograms come from
//! `actix-web-prom`; this module adds an `app_info` gauge carrying the API
//! version. Everything here is gated behind the `metrics` feature.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use prometheus::{IntGaugeVec, Opts};

/// Namespace prefixed to every exported metric.
pub const METRICS_NAMESPACE: &str = "employee_api";

/// Path serving the text exposition format.
pub const METRICS_ENDPOINT: &str = "/metrics";

/// Failures while setting up Prometheus metrics.
#[derive(thiserror::Error, Debug)]
pub enum MetricsError {
    /// The middleware builder rejected its configuration.
    #[error("failed to build Prometheus middleware: {message}")]
    Build { message: String },
    /// The `app_info` gauge could not be registered.
    #[error("failed to register metric: {0}")]
    Register(#[from] prometheus::Error),
}

/// Build the Prometheus middleware and register the `app_info` gauge.
///
/// # Errors
/// Returns [`MetricsError`] when the middleware cannot be built or the gauge
/// collides with an existing metric.
pub fn build_http_metrics(version: &str) -> Result<PrometheusMetrics, MetricsError> {
    let metrics = PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .endpoint(METRICS_ENDPOINT)
        .build()
        .map_err(|err| MetricsError::Build {
            message: err.to_string(),
        })?;

    let app_info = IntGaugeVec::new(
        Opts::new("app_info", "Build information for the running API").namespace(METRICS_NAMESPACE),
        &["version"],
    )?;
    metrics.registry.register(Box::new(app_info.clone()))?;
    app_info.with_label_values(&[version]).set(1);

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{Encoder, TextEncoder};

    #[test]
    fn app_info_is_exported_with_version() {
        let metrics = build_http_metrics("1.0.0").expect("metrics build");
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&metrics.registry.gather(), &mut buffer)
            .expect("encodes");
        let text = String::from_utf8(buffer).expect("utf8 exposition");
        assert!(text.contains("employee_api_app_info{version=\"1.0.0\"} 1"));
    }
}
