//! Prometheus metrics for monitoring API performance and health.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

/// Label for requests that hit no route (the fallback)
pub const UNMATCHED_ROUTE: &str = "unmatched";

const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// A form has at most a handful of fields
const FIELD_COUNT_BUCKETS: &[f64] = &[1.0, 2.0, 3.0, 5.0];

/// Install the global Prometheus recorder and return the handle `/metrics` renders from
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full("validation_failed_fields".to_string()),
            FIELD_COUNT_BUCKETS,
        )?
        .install_recorder()?;

    tracing::info!("Prometheus recorder installed");
    Ok(handle)
}

/// Middleware to record HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = route_label(&req);

    let in_flight = gauge!("http_requests_in_flight", "method" => method.clone(), "path" => path.clone());
    in_flight.increment(1.0);

    let response = next.run(req).await;

    in_flight.decrement(1.0);

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Route template the request matched (e.g. `/topicos/{id}`).
///
/// Raw paths are never used as labels, so arbitrary URLs cannot create new series.
fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_ROUTE.to_string(), |path| path.as_str().to_string())
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record a rejected form submission
pub fn record_validation_failure(form: &str, field_count: usize) {
    counter!("validation_failures_total", "form" => form.to_string()).increment(1);

    histogram!("validation_failed_fields", "form" => form.to_string()).record(field_count as f64);
}
