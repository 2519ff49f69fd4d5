use std::time::{Duration, Instant};

use anyhow::Context;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::{is_observability_enabled, status_class};

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `Ok(None)` when observability is disabled. Must be called from
/// within a tokio runtime.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .context("Failed to set histogram buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Records request counts, latency and in-flight requests per route.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);
    counter!("http_requests_by_status", "status_category" => status_class(status)).increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router exposing `/metrics` in the Prometheus text format.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_user_registered(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("users_registered_total", "role" => role.to_string()).increment(1);
}

pub fn track_login_success(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("user_logins_total", "role" => role.to_string(), "status" => "success").increment(1);
}

pub fn track_login_failure(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!(
        "user_logins_total",
        "role" => "unknown",
        "status" => "failure",
        "reason" => reason.to_string()
    )
    .increment(1);
}

pub fn track_jwt_issued(kind: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("jwt_tokens_issued_total", "kind" => kind).increment(1);
}

/// `resource` is `teacher` or `student`.
pub fn track_record_created(resource: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("records_created_total", "resource" => resource).increment(1);
}

pub fn track_record_deleted(resource: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("records_deleted_total", "resource" => resource).increment(1);
}
