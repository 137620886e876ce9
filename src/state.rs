use std::sync::Arc;
use std::time::Duration;

use journal_auth::RoleCookieCodec;
use journal_config::{AppConfig, CorsConfig};
use journal_core::AccessPolicy;
use journal_db::{DbPool, init_db_pool};
use journal_observability::{MetricsHandle, init_metrics};

use crate::middleware::policy::access_policy;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub policy: Arc<AccessPolicy>,
    pub cookie_codec: Arc<RoleCookieCodec>,
    pub secret: Arc<str>,
    pub metrics: Option<MetricsHandle>,
    pub cors: CorsConfig,
    pub request_timeout: Duration,
}

impl AppState {
    /// State over an existing pool with the default access policy, no metrics
    /// recorder and the default request timeout.
    pub fn new(db: DbPool, secret: &str) -> Self {
        Self {
            db,
            policy: Arc::new(access_policy()),
            cookie_codec: Arc::new(RoleCookieCodec::new(secret)),
            secret: Arc::from(secret),
            metrics: None,
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
            request_timeout: Duration::from_secs(4),
        }
    }
}

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let db = init_db_pool(&config.storage_path, config.http.idle_timeout).await?;

    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("migrations applied");

    let metrics = if config.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    Ok(AppState {
        metrics,
        cors: config.cors.clone(),
        request_timeout: config.http.timeout,
        ..AppState::new(db, &config.secret)
    })
}
