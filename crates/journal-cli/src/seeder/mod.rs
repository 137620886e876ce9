//! Fake data for local development.
//!
//! [`seed_all`] writes teachers, students, disciplines, and courses with
//! assignments and enrollments. Each stage runs in its own transaction.

pub mod catalog;
pub mod models;
pub mod users;

use std::time::Instant;

use journal_core::Role;
use journal_db::DbPool;

pub use models::{CourseSeed, SeedConfig, SeedReport, UserSeed};

pub async fn seed_all(db: &DbPool, config: SeedConfig) -> Result<SeedReport, sqlx::Error> {
    let start_time = Instant::now();
    let mut report = SeedReport::default();

    println!("🌱 Seeding database...");

    let teachers = users::insert_users(db, &users::generate_users(Role::Teacher, config.teachers)).await?;
    let students = users::insert_users(db, &users::generate_users(Role::Student, config.students)).await?;
    report.users = teachers.len() + students.len();
    println!("   ✓ {} teachers, {} students", teachers.len(), students.len());

    let disciplines =
        catalog::insert_disciplines(db, &catalog::generate_disciplines(config.disciplines)).await?;
    report.disciplines = disciplines.len();
    println!("   ✓ {} disciplines", disciplines.len());

    let courses = catalog::plan_courses(
        config.courses,
        &disciplines,
        &teachers,
        &students,
        config.subjects_per_course,
        config.students_per_course,
    );
    catalog::insert_courses(db, &courses, &mut report).await?;
    println!(
        "   ✓ {} courses, {} assignments, {} enrollments",
        report.courses, report.assignments, report.enrollments
    );

    println!("✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(report)
}
