//! The nested "my courses" view.
//!
//! ```json
//! {
//!   "status": "OK",
//!   "courses": [{
//!     "course_id": 1, "course_name": "Algorithms", "course_number": 101,
//!     "disciplines": [{
//!       "discipline_id": 2, "discipline_name": "Graphs",
//!       "teachers": [{ "id": 5, "last_name": "...", ... }],
//!       "grade": 5
//!     }]
//!   }]
//! }
//! ```

use chrono::NaiveDate;
use journal_core::{AssignmentId, CourseId, DisciplineId, Envelope, Role, UserId};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::users::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CourseOverview {
    pub course_id: CourseId,
    pub course_name: String,
    pub course_number: i64,
    pub disciplines: Vec<DisciplineOverview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DisciplineOverview {
    pub discipline_id: DisciplineId,
    pub discipline_name: String,
    pub teachers: Vec<User>,
    /// Latest grade of the requesting student in this discipline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyCoursesResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub courses: Vec<CourseOverview>,
}

/// One assignment joined with its discipline and teacher.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct OverviewRow {
    pub assignment_id: AssignmentId,
    pub course_id: CourseId,
    pub discipline_id: DisciplineId,
    pub discipline_name: String,
    pub teacher_id: UserId,
    pub teacher_last_name: String,
    pub teacher_first_name: String,
    pub teacher_patronymic: Option<String>,
    pub teacher_email: String,
    pub teacher_role: Role,
}

impl OverviewRow {
    pub fn teacher(&self) -> User {
        User {
            id: self.teacher_id,
            last_name: self.teacher_last_name.clone(),
            first_name: self.teacher_first_name.clone(),
            patronymic: self.teacher_patronymic.clone(),
            email: self.teacher_email.clone(),
            role: self.teacher_role,
        }
    }
}

/// Most recent grade of one student for one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct LatestGrade {
    pub assignment_id: AssignmentId,
    pub grade: i64,
    pub exam_date: NaiveDate,
}
