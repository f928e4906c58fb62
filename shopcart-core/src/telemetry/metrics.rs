//! Prometheus recorder setup and metric descriptions

use anyhow::Context;
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Histogram buckets in seconds, with sub-millisecond resolution for fast endpoints
const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Install the Prometheus recorder and return a handle for rendering metrics
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets(LATENCY_BUCKETS)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")?;
    Ok(handle)
}

/// Register HELP/TYPE lines so every metric shows up from startup
pub fn describe_metrics() {
    describe_counter!("shopcart_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "shopcart_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "shopcart_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    describe_counter!(
        "shopcart_auth_login_total",
        "Login attempts by result (success/invalid_credentials/error)"
    );
    describe_counter!(
        "shopcart_auth_signup_total",
        "Signup attempts by result (success/conflict/error)"
    );
}
