//! # Journal Config
//!
//! Configuration loaded from environment variables (optionally seeded from an
//! env-file):
//!
//! | Variable | Default |
//! |---|---|
//! | `ENV` | `local` |
//! | `STORAGE_PATH` | required |
//! | `SECRET` | required |
//! | `HTTP_ADDRESS` | `localhost:9999` |
//! | `HTTP_TIMEOUT_SECS` | `4` |
//! | `HTTP_IDLE_TIMEOUT_SECS` | `60` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000,http://localhost:5173` |
//! | `LOG_DIR` | unset |
//! | `METRICS_ENABLED` | `true` |

pub mod app;
pub mod cors;
pub mod error;
pub mod http;

pub use app::{AppConfig, Env};
pub use cors::CorsConfig;
pub use error::ConfigError;
pub use http::HttpServerConfig;

/// Source of configuration values, keyed by variable name.
pub type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

pub(crate) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
