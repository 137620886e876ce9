use axum::{Json, extract::State};
use chrono::Utc;
use tracing::{info, instrument};

use journal_core::{AppError, Envelope, ResultExt};
use journal_models::{ExamSignUpRequest, ExamSignUpResponse, GradeExamRequest};

use crate::middleware::policy::{RequireExamsGrade, RequireExamsSignUp};
use crate::modules::assignments::service::AssignmentService;
use crate::modules::exams::service::ExamService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/exams/sign-up",
    request_body = ExamSignUpRequest,
    responses(
        (status = 200, description = "Signed up, or an error envelope", body = ExamSignUpResponse),
        (status = 401, description = "Missing/invalid token or not a student", body = Envelope)
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn sign_up_for_exam(
    State(state): State<AppState>,
    RequireExamsSignUp(key): RequireExamsSignUp,
    ValidatedJson(request): ValidatedJson<ExamSignUpRequest>,
) -> Result<Json<ExamSignUpResponse>, AppError> {
    let assignment_id = AssignmentService::assignment_id(
        &state.db,
        request.course_id,
        request.discipline_id,
        request.teacher_id,
    )
    .await
    .failed_to("sign up for exam")?;

    let exam_id = ExamService::exam_sign_up(&state.db, key.id, assignment_id, request.exam_date)
        .await
        .failed_to("sign up for exam")?;

    info!(%exam_id, %assignment_id, "exam sign-up recorded");

    Ok(Json(ExamSignUpResponse {
        envelope: Envelope::ok(),
        exam_id,
    }))
}

#[utoipa::path(
    post,
    path = "/exams/grade",
    request_body = GradeExamRequest,
    responses(
        (status = 200, description = "Grade recorded, or an error envelope", body = Envelope),
        (status = 401, description = "Missing/invalid token or not a teacher", body = Envelope)
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn grade_exam(
    State(state): State<AppState>,
    RequireExamsGrade(key): RequireExamsGrade,
    ValidatedJson(request): ValidatedJson<GradeExamRequest>,
) -> Result<Envelope, AppError> {
    let assignment_id = AssignmentService::assignment_id(
        &state.db,
        request.course_id,
        request.discipline_id,
        key.id,
    )
    .await
    .failed_to("grade exam")?;

    let exam_id = ExamService::exam_id(&state.db, request.student_id, assignment_id, request.exam_date)
        .await
        .failed_to("grade exam")?;

    ExamService::exam_grade(
        &state.db,
        exam_id,
        key.id,
        request.grade,
        Utc::now().date_naive(),
    )
    .await
    .failed_to("grade exam")?;

    info!(%exam_id, grade = request.grade, "exam graded");

    Ok(Envelope::ok())
}
