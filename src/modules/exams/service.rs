use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};
use tracing::instrument;

use journal_core::{AppError, AssignmentId, ExamId, UserId};
use journal_db::DbPool;
use journal_models::LatestGrade;

use crate::modules::unique_violation_as;

pub struct ExamService;

impl ExamService {
    #[instrument(skip(db))]
    pub async fn exam_sign_up(
        db: &DbPool,
        student_id: UserId,
        assignment_id: AssignmentId,
        exam_date: NaiveDate,
    ) -> Result<ExamId, AppError> {
        let result = sqlx::query(
            "INSERT INTO exams (student_id, assignment_id, exam_date) VALUES (?, ?, ?)",
        )
        .bind(student_id)
        .bind(assignment_id)
        .bind(exam_date)
        .execute(db)
        .await
        .map_err(unique_violation_as("already signed up for this exam"))?;

        Ok(ExamId::new(result.last_insert_rowid()))
    }

    #[instrument(skip(db))]
    pub async fn exam_id(
        db: &DbPool,
        student_id: UserId,
        assignment_id: AssignmentId,
        exam_date: NaiveDate,
    ) -> Result<ExamId, AppError> {
        sqlx::query_scalar::<_, ExamId>(
            r#"SELECT id FROM exams
               WHERE student_id = ? AND assignment_id = ? AND exam_date = ?"#,
        )
        .bind(student_id)
        .bind(assignment_id)
        .bind(exam_date)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("exam not found"))
    }

    /// Records a grade for an exam, replacing any earlier grade.
    #[instrument(skip(db))]
    pub async fn exam_grade(
        db: &DbPool,
        exam_id: ExamId,
        grader_id: UserId,
        grade: i64,
        grade_date: NaiveDate,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO grades (exam_id, grader_id, grade, grade_date)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (exam_id) DO UPDATE SET
                   grader_id = excluded.grader_id,
                   grade = excluded.grade,
                   grade_date = excluded.grade_date"#,
        )
        .bind(exam_id)
        .bind(grader_id)
        .bind(grade)
        .bind(grade_date)
        .execute(db)
        .await?;

        Ok(())
    }

    /// The student's most recent grade for each of the given assignments.
    ///
    /// "Most recent" is the graded exam with the latest exam date; assignments
    /// without a graded exam are absent from the result.
    #[instrument(skip(db))]
    pub async fn latest_grades(
        db: &DbPool,
        student_id: UserId,
        assignment_ids: &[AssignmentId],
    ) -> Result<Vec<LatestGrade>, AppError> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"SELECT e.assignment_id, g.grade, e.exam_date
               FROM grades g
               JOIN exams e ON e.id = g.exam_id
               WHERE e.student_id = "#,
        );
        query.push_bind(student_id);
        query.push(" AND e.assignment_id IN (");
        let mut separated = query.separated(", ");
        for assignment_id in assignment_ids {
            separated.push_bind(*assignment_id);
        }
        separated.push_unseparated(")");
        query.push(" ORDER BY e.assignment_id, e.exam_date DESC, g.grade_date DESC, e.id DESC");

        let rows = query.build_query_as::<LatestGrade>().fetch_all(db).await?;

        let mut latest: Vec<LatestGrade> = Vec::with_capacity(rows.len());
        for row in rows {
            if latest.last().map(|g| g.assignment_id) != Some(row.assignment_id) {
                latest.push(row);
            }
        }

        Ok(latest)
    }
}
