use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{is_observability_enabled, status_class};

/// Logs one event per request with its id, route, status and latency.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let request_id = uuid::Uuid::new_v4().to_string();

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    match status_class(status) {
        "4xx" => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Client error"
        ),
        "5xx" => error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Request completed"
        ),
    }

    response
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "schoolhub={lvl},schoolhub_core={lvl},schoolhub_db={lvl},schoolhub_observability={lvl},tower_http=warn,hyper=warn,sqlx=warn",
            lvl = default_level
        ))
    })
}

/// Installs the global tracing subscriber.
///
/// Console output is always on. With observability enabled, two daily-rolling
/// files are added under `LOG_DIR` (default `storage/logs`): `schoolhub.json`
/// with structured events at info and above, and `schoolhub.log` with errors
/// only.
///
/// # Errors
///
/// Fails if the log directory cannot be created.
pub fn init_tracing() -> anyhow::Result<()> {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter(&log_level));

    if !is_observability_enabled() {
        tracing_subscriber::registry().with(console_layer).init();
        info!("Observability disabled, console logging only");
        return Ok(());
    }

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string());
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir))?;

    let error_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(
            Rotation::DAILY,
            &log_dir,
            "schoolhub.log",
        ))
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_layer = fmt::layer()
        .json()
        .with_writer(RollingFileAppender::new(
            Rotation::DAILY,
            &log_dir,
            "schoolhub.json",
        ))
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(env_filter(&log_level));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(error_layer)
        .with(json_layer)
        .init();

    info!(log_dir = %log_dir, "Tracing initialized with file logging");
    Ok(())
}
