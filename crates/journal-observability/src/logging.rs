use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use journal_config::Env;
use tracing::{Instrument, Level, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const LOG_FILE_PREFIX: &str = "journal.log";

fn default_level(env: Env) -> Level {
    match env {
        Env::Local | Env::Dev => Level::DEBUG,
        Env::Prod => Level::INFO,
    }
}

fn default_directives(env: Env) -> String {
    let level = default_level(env).as_str().to_ascii_lowercase();
    format!(
        "journal={level},journal_core={level},journal_auth={level},tower_http=warn,sqlx=warn,axum::rejection=trace"
    )
}

/// Installs the global tracing subscriber.
///
/// `Local` logs compact human-readable lines; `Dev` and `Prod` log JSON.
/// `RUST_LOG` overrides the default filter. With `log_dir` set, JSON lines
/// are also written to a daily-rolling file; keep the returned guard alive
/// for the lifetime of the process so buffered lines are flushed.
pub fn init_tracing(env: Env, log_dir: Option<&str>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    match env {
        Env::Local => layers.push(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        ),
        Env::Dev | Env::Prod => layers.push(fmt::layer().json().with_current_span(true).boxed()),
    }

    let guard = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

/// Logs every request with a generated request id, echoed back in the
/// `x-request-id` response header.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("request", request_id = %request_id, method = %method, path = %matched_path);

    let mut response = next.run(req).instrument(span.clone()).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    span.in_scope(|| match status {
        500..=599 => error!(status, latency_ms, "Server error"),
        400..=499 => warn!(status, latency_ms, "Client error"),
        _ => info!(status, latency_ms, "Request completed"),
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
