use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{info, instrument};

use journal_core::{AppError, CourseId, Envelope, ResultExt, UserId};
use journal_models::{
    CourseStudentsResponse, CreateCourseRequest, CreateCourseResponse, ModifyStudentsRequest,
    MyCoursesResponse,
};
use journal_observability::{track_course_created, track_enrollments_changed};

use crate::middleware::policy::{
    RequireCourseStudents, RequireCourseStudentsModify, RequireCoursesCreate, RequireCoursesList,
};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::JsonBody;

fn parse_course_id(raw: &str) -> Result<CourseId, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request("course not found"))
}

/// Resolves every item against the course in the path. Items naming a
/// different course are rejected rather than silently rewritten.
fn enrollment_pairs(
    course_id: CourseId,
    request: &ModifyStudentsRequest,
) -> Result<Vec<(CourseId, UserId)>, AppError> {
    request
        .enrollments
        .iter()
        .map(|item| match item.course_id {
            Some(other) if other != course_id => Err(AppError::bad_request(format!(
                "enrollment for course {} sent to course {}",
                other, course_id
            ))),
            _ => Ok((course_id, item.student_id)),
        })
        .collect()
}

#[utoipa::path(
    post,
    path = "/courses/create",
    request_body = CreateCourseRequest,
    responses(
        (status = 200, description = "Course created, or an error envelope", body = CreateCourseResponse),
        (status = 401, description = "Missing/invalid token or not an admin", body = Envelope)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireCoursesCreate(_caller): RequireCoursesCreate,
    JsonBody(request): JsonBody<CreateCourseRequest>,
) -> Result<Json<CreateCourseResponse>, AppError> {
    let course_id = CourseService::create_course(&state.db, &request)
        .await
        .failed_to("save course")?;

    track_course_created();
    info!(%course_id, subjects = request.subjects.len(), "course created");

    Ok(Json(CreateCourseResponse {
        envelope: Envelope::ok(),
        course_id,
    }))
}

#[utoipa::path(
    post,
    path = "/courses/{course_id}/modify/students",
    params(("course_id" = i64, Path, description = "Course ID")),
    request_body = ModifyStudentsRequest,
    responses(
        (status = 200, description = "Students enrolled, or an error envelope", body = Envelope),
        (status = 401, description = "Missing/invalid token or not an admin", body = Envelope)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn enroll_students(
    State(state): State<AppState>,
    RequireCourseStudentsModify(_caller): RequireCourseStudentsModify,
    Path(course_id): Path<String>,
    JsonBody(request): JsonBody<ModifyStudentsRequest>,
) -> Result<Envelope, AppError> {
    let course_id = parse_course_id(&course_id)?;
    let pairs = enrollment_pairs(course_id, &request)?;

    let inserted = CourseService::enroll_students(&state.db, &pairs)
        .await
        .failed_to("enroll students")?;

    track_enrollments_changed("enroll", inserted as usize);
    info!(%course_id, inserted, "students enrolled");

    Ok(Envelope::ok())
}

#[utoipa::path(
    delete,
    path = "/courses/{course_id}/modify/students",
    params(("course_id" = i64, Path, description = "Course ID")),
    request_body = ModifyStudentsRequest,
    responses(
        (status = 200, description = "Students removed, or an error envelope", body = Envelope),
        (status = 401, description = "Missing/invalid token or not an admin", body = Envelope)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn remove_students(
    State(state): State<AppState>,
    RequireCourseStudentsModify(_caller): RequireCourseStudentsModify,
    Path(course_id): Path<String>,
    JsonBody(request): JsonBody<ModifyStudentsRequest>,
) -> Result<Envelope, AppError> {
    let course_id = parse_course_id(&course_id)?;
    let pairs = enrollment_pairs(course_id, &request)?;

    let removed = CourseService::remove_students(&state.db, &pairs)
        .await
        .failed_to("remove students")?;

    track_enrollments_changed("remove", removed as usize);
    info!(%course_id, removed, "students removed");

    Ok(Envelope::ok())
}

#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "Courses of the caller with disciplines, teachers and grades", body = MyCoursesResponse),
        (status = 401, description = "Missing or invalid token", body = Envelope)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_my_courses(
    State(state): State<AppState>,
    RequireCoursesList(key): RequireCoursesList,
) -> Result<Json<MyCoursesResponse>, AppError> {
    let courses = CourseService::my_courses(&state.db, &key)
        .await
        .failed_to("list courses")?;

    Ok(Json(MyCoursesResponse {
        envelope: Envelope::ok(),
        courses,
    }))
}

#[utoipa::path(
    get,
    path = "/courses/{course_id}/students",
    params(("course_id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Students enrolled in the course", body = CourseStudentsResponse),
        (status = 401, description = "Missing/invalid token or a student caller", body = Envelope)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course_students(
    State(state): State<AppState>,
    RequireCourseStudents(_caller): RequireCourseStudents,
    Path(course_id): Path<String>,
) -> Result<Json<CourseStudentsResponse>, AppError> {
    let course_id = parse_course_id(&course_id)?;

    CourseService::get_course(&state.db, course_id)
        .await
        .failed_to("list course students")?;

    let students = CourseService::course_students(&state.db, course_id)
        .await
        .failed_to("list course students")?;

    Ok(Json(CourseStudentsResponse {
        envelope: Envelope::ok(),
        students,
    }))
}
