//! User rows and the caller descriptor response.

use journal_auth::AuthKey;
use journal_core::{Envelope, Role, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user as stored in `users`.
///
/// Users are provisioned out of band (see the `journal-cli` crate) and are
/// read-only for the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        match &self.patronymic {
            Some(patronymic) if !patronymic.is_empty() => {
                format!("{} {} {}", self.last_name, self.first_name, patronymic)
            }
            _ => format!("{} {}", self.last_name, self.first_name),
        }
    }
}

/// Fields needed to insert a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(flatten)]
    pub key: AuthKey,
}
