//! Prometheus wiring for the matcher's metrics hook.

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use pantry_match::{MatchMetrics, MatchType, set_match_metrics};

/// Reports classification calls through the `metrics` facade.
#[derive(Debug, Default)]
pub struct PrometheusMatchMetrics;

impl MatchMetrics for PrometheusMatchMetrics {
    fn record_match(
        &self,
        household_id: Option<&str>,
        best: Option<MatchType>,
        latency: Duration,
        match_count: usize,
    ) {
        // Household ids are unbounded; only record whether one was given.
        let scope = if household_id.is_some() { "household" } else { "global" };
        let best = best.map_or("none", MatchType::as_str);

        metrics::counter!("pantry_match_requests_total", "best_match" => best, "scope" => scope)
            .increment(1);
        metrics::histogram!("pantry_match_latency_seconds").record(latency.as_secs_f64());
        metrics::histogram!("pantry_match_results").record(match_count as f64);
    }
}

/// Install the global Prometheus recorder and route matcher metrics to it.
///
/// Call once per process; a second call fails because the recorder is
/// already set.
pub fn install() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!(
        "pantry_match_requests_total",
        "Ingredients classified, by best match tier"
    );
    metrics::describe_histogram!(
        "pantry_match_latency_seconds",
        metrics::Unit::Seconds,
        "Time spent classifying one ingredient"
    );
    metrics::describe_histogram!(
        "pantry_match_results",
        "Matches returned per classified ingredient"
    );
    metrics::describe_counter!("pantry_http_requests_total", "HTTP requests by status");

    set_match_metrics(Some(Arc::new(PrometheusMatchMetrics)));
    Ok(handle)
}
