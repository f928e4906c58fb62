//! Telemetry initialization: structured logging and metrics

pub mod metrics;

use crate::config::TelemetryConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "shopcart_core=info,tower_http=debug";

/// Install the global subscriber and, when enabled, the Prometheus recorder.
///
/// Returns the handle `/metrics` renders from.
pub fn init(config: &TelemetryConfig) -> anyhow::Result<Option<PrometheusHandle>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let prometheus_handle = if config.metrics_enabled {
        let handle = metrics::install_prometheus_recorder()?;
        metrics::describe_metrics();
        Some(handle)
    } else {
        None
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.log_format == "json" {
        // Flattened so `message` sits at the top level of each line
        registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    Ok(prometheus_handle)
}
