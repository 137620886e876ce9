use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

pub use metrics_exporter_prometheus::PrometheusHandle as MetricsHandle;

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Installs the global Prometheus recorder and spawns its upkeep task.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(UPKEEP_INTERVAL).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}

pub fn track_course_created() {
    counter!("courses_created_total").increment(1);
}

pub fn track_enrollments_changed(action: &'static str, count: usize) {
    counter!("enrollments_changed_total", "action" => action).increment(count as u64);
}

/// Outcome of resolving the caller from the role cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieLookup {
    Hit,
    Miss,
    Stale,
}

impl CookieLookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            CookieLookup::Hit => "hit",
            CookieLookup::Miss => "miss",
            CookieLookup::Stale => "stale",
        }
    }
}

pub fn track_role_cookie_lookup(outcome: CookieLookup) {
    counter!("role_cookie_lookups_total", "outcome" => outcome.as_str()).increment(1);
}
