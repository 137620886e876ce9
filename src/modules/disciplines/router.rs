use axum::{Router, routing::get};
use journal_core::routes;

use crate::state::AppState;

use super::controller::{get_course_disciplines, get_discipline_teachers, list_disciplines};

pub fn init_disciplines_router() -> Router<AppState> {
    Router::new()
        .route(routes::DISCIPLINES, get(list_disciplines))
        .route(routes::COURSE_DISCIPLINES, get(get_course_disciplines))
        .route(routes::DISCIPLINE_TEACHERS, get(get_discipline_teachers))
}
