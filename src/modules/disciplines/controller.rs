use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use journal_core::{AppError, CourseId, DisciplineId, Envelope, ResultExt};
use journal_models::{DisciplinesResponse, TeachersResponse};

use crate::middleware::policy::{
    RequireCourseDisciplines, RequireDisciplineTeachers, RequireDisciplinesList,
};
use crate::modules::courses::service::CourseService;
use crate::modules::disciplines::service::DisciplineService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/disciplines",
    responses(
        (status = 200, description = "Every discipline, ordered by name", body = DisciplinesResponse),
        (status = 401, description = "Missing or invalid token", body = Envelope)
    ),
    tag = "Disciplines",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_disciplines(
    State(state): State<AppState>,
    RequireDisciplinesList(_caller): RequireDisciplinesList,
) -> Result<Json<DisciplinesResponse>, AppError> {
    let disciplines = DisciplineService::list_disciplines(&state.db)
        .await
        .failed_to("list disciplines")?;

    Ok(Json(DisciplinesResponse {
        envelope: Envelope::ok(),
        disciplines,
    }))
}

#[utoipa::path(
    get,
    path = "/courses/{course_id}/disciplines",
    params(("course_id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Disciplines taught in the course", body = DisciplinesResponse),
        (status = 401, description = "Missing or invalid token", body = Envelope)
    ),
    tag = "Disciplines",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course_disciplines(
    State(state): State<AppState>,
    RequireCourseDisciplines(_caller): RequireCourseDisciplines,
    Path(course_id): Path<String>,
) -> Result<Json<DisciplinesResponse>, AppError> {
    let course_id: CourseId = course_id
        .parse()
        .map_err(|_| AppError::bad_request("course not found"))?;

    CourseService::get_course(&state.db, course_id)
        .await
        .failed_to("get course disciplines")?;

    let disciplines = DisciplineService::course_disciplines(&state.db, course_id)
        .await
        .failed_to("get course disciplines")?;

    Ok(Json(DisciplinesResponse {
        envelope: Envelope::ok(),
        disciplines,
    }))
}

#[utoipa::path(
    get,
    path = "/courses/{course_id}/disciplines/{discipline_id}/teachers",
    params(
        ("course_id" = i64, Path, description = "Course ID"),
        ("discipline_id" = i64, Path, description = "Discipline ID")
    ),
    responses(
        (status = 200, description = "Teachers of the discipline in the course", body = TeachersResponse),
        (status = 401, description = "Missing or invalid token", body = Envelope)
    ),
    tag = "Disciplines",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_discipline_teachers(
    State(state): State<AppState>,
    RequireDisciplineTeachers(_caller): RequireDisciplineTeachers,
    Path((course_id, discipline_id)): Path<(String, String)>,
) -> Result<Json<TeachersResponse>, AppError> {
    let course_id: CourseId = course_id
        .parse()
        .map_err(|_| AppError::bad_request("course not found"))?;
    let discipline_id: DisciplineId = discipline_id
        .parse()
        .map_err(|_| AppError::bad_request("discipline not found"))?;

    let teachers = DisciplineService::discipline_teachers(&state.db, course_id, discipline_id)
        .await
        .failed_to("get discipline teachers")?;

    Ok(Json(TeachersResponse {
        envelope: Envelope::ok(),
        teachers,
    }))
}
