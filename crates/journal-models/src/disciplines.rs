use journal_core::{DisciplineId, Envelope};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::users::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Discipline {
    #[serde(rename = "discipline_id")]
    pub id: DisciplineId,
    #[serde(rename = "discipline_name")]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DisciplinesResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub disciplines: Vec<Discipline>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeachersResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub teachers: Vec<User>,
}
