use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

pub const REQUESTS_TOTAL: &str = "job_search_requests_total";
pub const DURATION_SECONDS: &str = "job_search_duration_seconds";
pub const AUTOMATION_EVENTS_TOTAL: &str = "automation_events_total";

/// Register descriptions for the metrics the search handler records.
pub fn describe_metrics() {
    metrics::describe_counter!(REQUESTS_TOTAL, "Job search requests by outcome");
    metrics::describe_histogram!(
        DURATION_SECONDS,
        metrics::Unit::Seconds,
        "Time from request receipt to response for job searches"
    );
    metrics::describe_counter!(
        AUTOMATION_EVENTS_TOTAL,
        "Events received from the automation service, by type"
    );
}

/// GET /metrics — Prometheus text exposition.
pub async fn prometheus_metrics(State(handle): State<Arc<PrometheusHandle>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}
