//! # SchoolHub Observability
//!
//! - [`logging`]: tracing subscriber setup and the per-request logging middleware
//! - [`metrics`]: Prometheus recorder, HTTP metrics middleware and domain counters
//!
//! Everything beyond console logging is switched off at runtime with
//! `OBSERVABILITY_ENABLED=false`.
//!
//! ```ignore
//! use schoolhub_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     let metrics_handle = init_metrics()?;
//!     // ...
//! }
//! ```

pub mod logging;
pub mod metrics;

use std::sync::OnceLock;

pub use logging::{init_tracing, logging_middleware};
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_jwt_issued, track_login_failure,
    track_login_success, track_record_created, track_record_deleted, track_user_registered,
};
pub use metrics_exporter_prometheus::PrometheusHandle;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Reads `OBSERVABILITY_ENABLED` once (default: enabled).
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .ok()
            .and_then(|v| schoolhub_config::parse_flag(&v))
            .unwrap_or(true)
    })
}

/// Buckets an HTTP status into the label used by logs and metrics.
pub(crate) fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
