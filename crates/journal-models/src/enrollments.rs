use journal_core::{CourseId, EnrollmentId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub course_id: CourseId,
    pub student_id: UserId,
}

/// A (course, student) pair in an enroll/remove request body.
///
/// `course_id` may be omitted; the course named in the request path applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentItem {
    #[serde(default)]
    pub course_id: Option<CourseId>,
    pub student_id: UserId,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModifyStudentsRequest {
    pub enrollments: Vec<EnrollmentItem>,
}
