use sqlx::{QueryBuilder, Sqlite};
use tracing::instrument;

use journal_auth::AuthKey;
use journal_core::{AppError, CourseId, Role, UserId};
use journal_db::DbPool;
use journal_models::{Course, CourseOverview, CreateCourseRequest, OverviewRow, User};

use crate::modules::courses::overview;
use crate::modules::exams::service::ExamService;
use crate::modules::unique_violation_as;

pub struct CourseService;

impl CourseService {
    /// Inserts the course and one assignment per subject.
    ///
    /// Statements run one by one: when an assignment insert fails, the course
    /// row and the assignments before it stay committed.
    #[instrument(skip(db))]
    pub async fn create_course(
        db: &DbPool,
        request: &CreateCourseRequest,
    ) -> Result<CourseId, AppError> {
        let result = sqlx::query("INSERT INTO courses (num, name) VALUES (?, ?)")
            .bind(request.number)
            .bind(&request.name)
            .execute(db)
            .await?;

        let course_id = CourseId::new(result.last_insert_rowid());

        for subject in &request.subjects {
            sqlx::query(
                "INSERT INTO assignments (course_id, discipline_id, teacher_id) VALUES (?, ?, ?)",
            )
            .bind(course_id)
            .bind(subject.discipline_id)
            .bind(subject.teacher_id)
            .execute(db)
            .await
            .map_err(unique_violation_as("duplicate subject in course"))?;
        }

        Ok(course_id)
    }

    /// Inserts one enrollment per pair; earlier inserts stay committed when a
    /// later one fails.
    #[instrument(skip(db))]
    pub async fn enroll_students(
        db: &DbPool,
        enrollments: &[(CourseId, UserId)],
    ) -> Result<u64, AppError> {
        let mut inserted = 0;

        for &(course_id, student_id) in enrollments {
            inserted += sqlx::query("INSERT INTO enrollments (course_id, student_id) VALUES (?, ?)")
                .bind(course_id)
                .bind(student_id)
                .execute(db)
                .await
                .map_err(unique_violation_as("student already enrolled"))?
                .rows_affected();
        }

        Ok(inserted)
    }

    /// Deletes matching enrollments. Pairs without a match are skipped.
    #[instrument(skip(db))]
    pub async fn remove_students(
        db: &DbPool,
        enrollments: &[(CourseId, UserId)],
    ) -> Result<u64, AppError> {
        let mut removed = 0;

        for &(course_id, student_id) in enrollments {
            removed += sqlx::query("DELETE FROM enrollments WHERE course_id = ? AND student_id = ?")
                .bind(course_id)
                .bind(student_id)
                .execute(db)
                .await?
                .rows_affected();
        }

        Ok(removed)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &DbPool, course_id: CourseId) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>("SELECT id, name, num FROM courses WHERE id = ?")
            .bind(course_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("course not found"))
    }

    /// Courses the teacher has at least one assignment in.
    #[instrument(skip(db))]
    pub async fn teacher_courses(db: &DbPool, teacher_id: UserId) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT DISTINCT c.id, c.name, c.num
               FROM courses c
               JOIN assignments a ON a.course_id = c.id
               WHERE a.teacher_id = ?
               ORDER BY c.id"#,
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    /// Courses the student is enrolled in.
    #[instrument(skip(db))]
    pub async fn student_courses(db: &DbPool, student_id: UserId) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT DISTINCT c.id, c.name, c.num
               FROM courses c
               JOIN enrollments e ON e.course_id = c.id
               WHERE e.student_id = ?
               ORDER BY c.id"#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn course_students(db: &DbPool, course_id: CourseId) -> Result<Vec<User>, AppError> {
        let students = sqlx::query_as::<_, User>(
            r#"SELECT u.id, u.last_name, u.first_name, u.patronymic, u.email, u.role
               FROM users u
               JOIN enrollments e ON e.student_id = u.id
               WHERE e.course_id = ?
               ORDER BY u.last_name, u.first_name, u.id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    /// Every assignment of the given courses joined with its discipline and
    /// teacher, ordered by course, discipline and teacher.
    #[instrument(skip(db))]
    pub async fn course_overview_rows(
        db: &DbPool,
        course_ids: &[CourseId],
    ) -> Result<Vec<OverviewRow>, AppError> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"SELECT a.id AS assignment_id,
                      a.course_id,
                      a.discipline_id,
                      d.name AS discipline_name,
                      u.id AS teacher_id,
                      u.last_name AS teacher_last_name,
                      u.first_name AS teacher_first_name,
                      u.patronymic AS teacher_patronymic,
                      u.email AS teacher_email,
                      u.role AS teacher_role
               FROM assignments a
               JOIN disciplines d ON d.id = a.discipline_id
               JOIN users u ON u.id = a.teacher_id
               WHERE a.course_id IN ("#,
        );
        let mut separated = query.separated(", ");
        for course_id in course_ids {
            separated.push_bind(*course_id);
        }
        separated.push_unseparated(")");
        query.push(" ORDER BY a.course_id, a.discipline_id, u.id");

        let rows = query.build_query_as::<OverviewRow>().fetch_all(db).await?;

        Ok(rows)
    }

    /// The "my courses" view for the caller.
    ///
    /// Runs as three batch stages: base courses for the role, the
    /// assignment/discipline/teacher rows of those courses, and (for
    /// students) the latest grade per assignment. A failing stage fails the
    /// whole call.
    #[instrument(skip(db))]
    pub async fn my_courses(db: &DbPool, key: &AuthKey) -> Result<Vec<CourseOverview>, AppError> {
        let courses = match key.role {
            Role::Teacher => Self::teacher_courses(db, key.id).await?,
            Role::Student => Self::student_courses(db, key.id).await?,
            Role::Admin => return Ok(Vec::new()),
        };

        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<CourseId> = courses.iter().map(|course| course.id).collect();
        let rows = Self::course_overview_rows(db, &course_ids).await?;

        let grades = match key.role {
            Role::Student => {
                let assignment_ids: Vec<_> = rows.iter().map(|row| row.assignment_id).collect();
                ExamService::latest_grades(db, key.id, &assignment_ids).await?
            }
            Role::Teacher | Role::Admin => Vec::new(),
        };

        Ok(overview::assemble(courses, rows, grades))
    }
}
