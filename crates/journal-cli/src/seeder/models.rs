//! Seed rows and seeding configuration.

use journal_core::{DisciplineId, Role, UserId};

/// A generated user ready for insertion.
pub struct UserSeed {
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    pub email: String,
    pub role: Role,
}

/// A generated course with its subjects and enrolled students.
pub struct CourseSeed {
    pub name: String,
    pub number: i64,
    pub subjects: Vec<(DisciplineId, UserId)>,
    pub students: Vec<UserId>,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub teachers: usize,
    pub students: usize,
    pub disciplines: usize,
    pub courses: usize,
    /// Upper bound on subjects per course; fewer when disciplines run out.
    pub subjects_per_course: usize,
    pub students_per_course: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 10,
            students: 100,
            disciplines: 12,
            courses: 5,
            subjects_per_course: 4,
            students_per_course: 25,
        }
    }
}

/// Row counts written by a seeding run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub disciplines: usize,
    pub courses: usize,
    pub assignments: usize,
    pub enrollments: usize,
}
