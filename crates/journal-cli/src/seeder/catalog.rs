//! Disciplines, courses, assignments and enrollments.

use fake::Fake;
use fake::faker::lorem::en::Word;
use journal_core::{CourseId, DisciplineId, UserId};
use journal_db::DbPool;
use rand::Rng;
use rand::seq::SliceRandom;

use super::models::{CourseSeed, SeedReport};

/// Distinct discipline names, suffixed with their index.
pub fn generate_disciplines(count: usize) -> Vec<String> {
    (0..count)
        .map(|idx| {
            let word: String = Word().fake();
            let mut chars = word.chars();
            let title = match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            };
            format!("{} {}", title, idx + 1)
        })
        .collect()
}

/// Picks distinct disciplines per course, a random teacher for each, and a
/// random subset of students.
pub fn plan_courses(
    count: usize,
    disciplines: &[DisciplineId],
    teachers: &[UserId],
    students: &[UserId],
    subjects_per_course: usize,
    students_per_course: usize,
) -> Vec<CourseSeed> {
    let mut rng = rand::thread_rng();

    (0..count)
        .map(|idx| {
            let subjects = if teachers.is_empty() {
                Vec::new()
            } else {
                disciplines
                    .choose_multiple(&mut rng, subjects_per_course)
                    .map(|&discipline| (discipline, teachers[rng.gen_range(0..teachers.len())]))
                    .collect()
            };

            CourseSeed {
                name: format!("{} course", Word().fake::<String>()),
                number: 100 + idx as i64,
                subjects,
                students: students
                    .choose_multiple(&mut rng, students_per_course)
                    .copied()
                    .collect(),
            }
        })
        .collect()
}

pub async fn insert_disciplines(
    db: &DbPool,
    names: &[String],
) -> Result<Vec<DisciplineId>, sqlx::Error> {
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(names.len());

    for name in names {
        let id: DisciplineId =
            sqlx::query_scalar("INSERT INTO disciplines (name) VALUES (?) RETURNING id")
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;
        ids.push(id);
    }

    tx.commit().await?;
    Ok(ids)
}

pub async fn insert_courses(
    db: &DbPool,
    courses: &[CourseSeed],
    report: &mut SeedReport,
) -> Result<Vec<CourseId>, sqlx::Error> {
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(courses.len());

    for course in courses {
        let course_id: CourseId =
            sqlx::query_scalar("INSERT INTO courses (num, name) VALUES (?, ?) RETURNING id")
                .bind(course.number)
                .bind(&course.name)
                .fetch_one(&mut *tx)
                .await?;

        for &(discipline_id, teacher_id) in &course.subjects {
            sqlx::query(
                "INSERT INTO assignments (course_id, discipline_id, teacher_id) VALUES (?, ?, ?)",
            )
            .bind(course_id)
            .bind(discipline_id)
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;
        }

        for &student_id in &course.students {
            sqlx::query("INSERT INTO enrollments (course_id, student_id) VALUES (?, ?)")
                .bind(course_id)
                .bind(student_id)
                .execute(&mut *tx)
                .await?;
        }

        report.assignments += course.subjects.len();
        report.enrollments += course.students.len();
        ids.push(course_id);
    }

    tx.commit().await?;
    report.courses += ids.len();
    Ok(ids)
}
