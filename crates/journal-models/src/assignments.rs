use journal_core::{AssignmentId, CourseId, DisciplineId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Binds one teacher to one discipline within one course.
///
/// The (course, discipline, teacher) triple is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    #[serde(rename = "assignment_id")]
    pub id: AssignmentId,
    pub course_id: CourseId,
    pub discipline_id: DisciplineId,
    pub teacher_id: UserId,
}
