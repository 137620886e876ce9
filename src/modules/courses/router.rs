use axum::{
    Router,
    routing::{get, post},
};
use journal_core::routes;

use crate::state::AppState;

use super::controller::{
    create_course, enroll_students, get_course_students, list_my_courses, remove_students,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route(routes::COURSES, get(list_my_courses))
        .route(routes::COURSES_CREATE, post(create_course))
        .route(
            routes::COURSE_STUDENTS_MODIFY,
            post(enroll_students).delete(remove_students),
        )
        .route(routes::COURSE_STUDENTS, get(get_course_students))
}
