use axum::Json;
use tracing::instrument;

use journal_core::{AppError, Envelope};
use journal_models::MeResponse;

use crate::middleware::policy::RequireMe;

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "The resolved caller", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = Envelope)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument]
pub async fn get_me(RequireMe(key): RequireMe) -> Result<Json<MeResponse>, AppError> {
    Ok(Json(MeResponse {
        envelope: Envelope::ok(),
        key,
    }))
}
