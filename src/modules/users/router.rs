use axum::{Router, routing::get};
use journal_core::routes;

use crate::state::AppState;

use super::controller::get_me;

pub fn init_users_router() -> Router<AppState> {
    Router::new().route(routes::ME, get(get_me))
}
