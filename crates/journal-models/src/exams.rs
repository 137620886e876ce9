//! Exam sign-ups and grades.

use chrono::NaiveDate;
use journal_core::{AssignmentId, CourseId, DisciplineId, Envelope, ExamId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::dates::deserialize_calendar_date;

pub const MIN_GRADE: i64 = 1;
pub const MAX_GRADE: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Exam {
    pub id: ExamId,
    pub student_id: UserId,
    pub assignment_id: AssignmentId,
    pub exam_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub exam_id: ExamId,
    pub grader_id: UserId,
    pub grade: i64,
    pub grade_date: NaiveDate,
}

/// A student signs up for an exam with the teacher of one discipline.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ExamSignUpRequest {
    pub course_id: CourseId,
    pub discipline_id: DisciplineId,
    pub teacher_id: UserId,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(deserialize_with = "deserialize_calendar_date")]
    #[schema(value_type = String, format = Date)]
    pub exam_date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExamSignUpResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub exam_id: ExamId,
}

/// A teacher grades a student's exam in a discipline they teach.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GradeExamRequest {
    pub student_id: UserId,
    pub course_id: CourseId,
    pub discipline_id: DisciplineId,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    #[schema(value_type = String, format = Date)]
    pub exam_date: NaiveDate,
    #[validate(range(min = 1, max = 5, message = "grade must be between 1 and 5"))]
    pub grade: i64,
}
