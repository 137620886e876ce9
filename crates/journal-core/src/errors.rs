//! Application error type and its HTTP mapping.
//!
//! Every failure a handler can produce is an [`AppError`]. The error carries a
//! client-facing `message` and, optionally, the underlying cause. The cause is
//! logged at the handler boundary and never serialized into the response.
//!
//! Only [`ErrorKind::Unauthorized`] changes the HTTP status (401). Every other
//! kind is reported with status 200 and an error envelope:
//!
//! ```json
//! { "status": "Error", "error": "failed to save course" }
//! ```

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::Envelope;

/// Client message used for persistence failures that were never given a
/// more specific one with [`ResultExt::failed_to`].
const OPAQUE_PERSISTENCE_MESSAGE: &str = "internal error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A user, course or row is absent.
    NotFound,
    /// Missing/invalid token or a role the access policy does not allow.
    Unauthorized,
    /// Malformed JSON, failed field validation or an unparseable path parameter.
    BadRequest,
    /// The relational store rejected or failed a statement.
    Persistence,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub source: Option<Error>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn persistence<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind: ErrorKind::Persistence,
            message: OPAQUE_PERSISTENCE_MESSAGE.to_string(),
            source: Some(err.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches the underlying cause without changing the client message.
    pub fn with_source<E>(mut self, err: E) -> Self
    where
        E: Into<Error>,
    {
        self.source = Some(err.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound | ErrorKind::BadRequest | ErrorKind::Persistence => StatusCode::OK,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {:#}", self.message, source),
            None => f.write_str(&self.message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.kind {
            ErrorKind::Unauthorized => "unauthorized".to_string(),
            _ => self.message,
        };

        (status, Json(Envelope::error(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::persistence(err)
    }
}

/// Handler-boundary helpers for results carrying an [`AppError`].
pub trait ResultExt<T> {
    /// Logs the failure in the current span and, for persistence failures,
    /// replaces the client message with `failed to <action>`.
    fn failed_to(self, action: &str) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn failed_to(self, action: &str) -> Result<T, AppError> {
        self.map_err(|mut err| {
            match err.kind {
                ErrorKind::Persistence => {
                    tracing::error!(error = %err, "failed to {}", action);
                    err.message = format!("failed to {}", action);
                }
                ErrorKind::Unauthorized => {
                    tracing::warn!(error = %err, "unauthorized attempt to {}", action);
                }
                ErrorKind::NotFound | ErrorKind::BadRequest => {
                    tracing::info!(error = %err, "rejected attempt to {}", action);
                }
            }
            err
        })
    }
}
