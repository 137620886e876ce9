use axum::{Router, routing::post};
use journal_core::routes;

use crate::state::AppState;

use super::controller::{grade_exam, sign_up_for_exam};

pub fn init_exams_router() -> Router<AppState> {
    Router::new()
        .route(routes::EXAMS_SIGN_UP, post(sign_up_for_exam))
        .route(routes::EXAMS_GRADE, post(grade_exam))
}
