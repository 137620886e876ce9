//! Courses, course creation and course listings.

use journal_core::{CourseId, DisciplineId, Envelope, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::users::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    #[serde(rename = "course_id")]
    pub id: CourseId,
    #[serde(rename = "course_name")]
    pub name: String,
    #[serde(rename = "course_number")]
    #[sqlx(rename = "num")]
    pub number: i64,
}

/// One (teacher, discipline) pair taught within a new course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subject {
    pub teacher_id: UserId,
    pub discipline_id: DisciplineId,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub name: String,
    pub number: i64,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateCourseResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub course_id: CourseId,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseStudentsResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub students: Vec<User>,
}
