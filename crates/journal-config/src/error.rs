use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is not set.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// The variable is set but cannot be parsed into the expected type.
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The env-file passed with `--config` could not be loaded.
    #[error("Failed to load config file {path}: {reason}")]
    File { path: String, reason: String },
}
