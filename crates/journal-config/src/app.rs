use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{ConfigError, CorsConfig, HttpServerConfig, Lookup};

/// Deployment environment. Selects the log format and verbosity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Env {
    #[default]
    Local,
    Dev,
    Prod,
}

impl Env {
    pub fn as_str(&self) -> &'static str {
        match self {
            Env::Local => "local",
            Env::Dev => "dev",
            Env::Prod => "prod",
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Env::Local),
            "dev" => Ok(Env::Dev),
            "prod" => Ok(Env::Prod),
            other => Err(format!("expected one of local, dev, prod; got `{}`", other)),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Env,
    pub storage_path: String,
    /// Signs bearer tokens and derives the role cookie key.
    pub secret: String,
    pub http: HttpServerConfig,
    pub cors: CorsConfig,
    pub log_dir: Option<String>,
    pub metrics_enabled: bool,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("storage_path", &self.storage_path)
            .field("secret", &"<redacted>")
            .field("http", &self.http)
            .field("cors", &self.cors)
            .field("log_dir", &self.log_dir)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&crate::process_env)
    }

    /// Loads `path` as an env-file into the process environment, then reads
    /// the configuration. Variables already set in the environment win.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|e| ConfigError::File {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_env()
    }

    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let env = match lookup("ENV") {
            None => Env::default(),
            Some(value) => value.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "ENV".to_string(),
                value: value.clone(),
                reason,
            })?,
        };

        let metrics_enabled = match lookup("METRICS_ENABLED") {
            None => true,
            Some(value) => parse_bool("METRICS_ENABLED", &value)?,
        };

        Ok(Self {
            env,
            storage_path: required(lookup, "STORAGE_PATH")?,
            secret: required(lookup, "SECRET")?,
            http: HttpServerConfig::from_lookup(lookup)?,
            cors: CorsConfig::from_lookup(lookup),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
            metrics_enabled,
        })
    }
}

fn required(lookup: &Lookup<'_>, key: &str) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
