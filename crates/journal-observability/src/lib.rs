//! # Journal Observability
//!
//! - [`logging`]: tracing subscriber setup and per-request logging
//! - [`metrics`]: Prometheus recorder, HTTP metrics and domain counters
//!
//! Without an installed recorder the metric helpers are no-ops, which is
//! what tests and `METRICS_ENABLED=false` rely on.

pub mod logging;
pub mod metrics;

pub use self::logging::{REQUEST_ID_HEADER, init_tracing, logging_middleware};
pub use self::metrics::{
    CookieLookup, MetricsHandle, init_metrics, metrics_middleware, track_course_created,
    track_enrollments_changed, track_role_cookie_lookup,
};
