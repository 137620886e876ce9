pub mod assignments;
pub mod courses;
pub mod disciplines;
pub mod exams;
pub mod users;

use journal_core::AppError;

/// Maps a unique-constraint violation to a bad request carrying `message`.
/// Any other database failure stays a persistence error.
pub(crate) fn unique_violation_as(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| {
        if matches!(&err, sqlx::Error::Database(db_err) if db_err.is_unique_violation()) {
            AppError::bad_request(message).with_source(err)
        } else {
            AppError::from(err)
        }
    }
}
