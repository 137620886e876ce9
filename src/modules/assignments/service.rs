use tracing::instrument;

use journal_core::{AppError, AssignmentId, CourseId, DisciplineId, UserId};
use journal_db::DbPool;
use journal_models::Assignment;

pub struct AssignmentService;

impl AssignmentService {
    /// Resolves the assignment binding a teacher to a discipline in a course.
    ///
    /// The triple is unique, so at most one row matches.
    #[instrument(skip(db))]
    pub async fn assignment_id(
        db: &DbPool,
        course_id: CourseId,
        discipline_id: DisciplineId,
        teacher_id: UserId,
    ) -> Result<AssignmentId, AppError> {
        sqlx::query_scalar::<_, AssignmentId>(
            r#"SELECT id FROM assignments
               WHERE course_id = ? AND discipline_id = ? AND teacher_id = ?"#,
        )
        .bind(course_id)
        .bind(discipline_id)
        .bind(teacher_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("assignment not found"))
    }

    #[instrument(skip(db))]
    pub async fn assignments_by_course(
        db: &DbPool,
        course_id: CourseId,
    ) -> Result<Vec<Assignment>, AppError> {
        let assignments = sqlx::query_as::<_, Assignment>(
            r#"SELECT id, course_id, discipline_id, teacher_id
               FROM assignments
               WHERE course_id = ?
               ORDER BY id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(assignments)
    }
}
