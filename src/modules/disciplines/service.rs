use tracing::instrument;

use journal_core::{AppError, CourseId, DisciplineId};
use journal_db::DbPool;
use journal_models::{Discipline, User};

use crate::modules::assignments::service::AssignmentService;
use crate::modules::users::service::UserService;

pub struct DisciplineService;

impl DisciplineService {
    #[instrument(skip(db))]
    pub async fn list_disciplines(db: &DbPool) -> Result<Vec<Discipline>, AppError> {
        let disciplines =
            sqlx::query_as::<_, Discipline>("SELECT id, name FROM disciplines ORDER BY name, id")
                .fetch_all(db)
                .await?;

        Ok(disciplines)
    }

    /// Disciplines taught in a course, each listed once.
    #[instrument(skip(db))]
    pub async fn course_disciplines(
        db: &DbPool,
        course_id: CourseId,
    ) -> Result<Vec<Discipline>, AppError> {
        let disciplines = sqlx::query_as::<_, Discipline>(
            r#"SELECT DISTINCT d.id, d.name
               FROM disciplines d
               JOIN assignments a ON a.discipline_id = d.id
               WHERE a.course_id = ?
               ORDER BY d.id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(disciplines)
    }

    /// Teachers assigned to a discipline within a course, in assignment
    /// order. Any user lookup failure fails the whole listing.
    #[instrument(skip(db))]
    pub async fn discipline_teachers(
        db: &DbPool,
        course_id: CourseId,
        discipline_id: DisciplineId,
    ) -> Result<Vec<User>, AppError> {
        let assignments = AssignmentService::assignments_by_course(db, course_id).await?;

        let mut teachers = Vec::new();
        for assignment in assignments
            .iter()
            .filter(|assignment| assignment.discipline_id == discipline_id)
        {
            teachers.push(UserService::get_user(db, assignment.teacher_id).await?);
        }

        Ok(teachers)
    }
}
