use journal_auth::AuthKey;
use journal_core::{Envelope, Role, Status};
use journal_models::{
    Course, CourseOverview, CourseStudentsResponse, CreateCourseRequest, CreateCourseResponse,
    Discipline, DisciplineOverview, DisciplinesResponse, EnrollmentItem, ExamSignUpRequest,
    ExamSignUpResponse, GradeExamRequest, MeResponse, ModifyStudentsRequest, MyCoursesResponse,
    Subject, TeachersResponse, User,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::enroll_students,
        crate::modules::courses::controller::remove_students,
        crate::modules::courses::controller::list_my_courses,
        crate::modules::courses::controller::get_course_students,
        crate::modules::disciplines::controller::list_disciplines,
        crate::modules::disciplines::controller::get_course_disciplines,
        crate::modules::disciplines::controller::get_discipline_teachers,
        crate::modules::exams::controller::sign_up_for_exam,
        crate::modules::exams::controller::grade_exam,
        crate::modules::users::controller::get_me,
    ),
    components(
        schemas(
            Envelope,
            Status,
            Role,
            AuthKey,
            User,
            MeResponse,
            Course,
            Subject,
            CreateCourseRequest,
            CreateCourseResponse,
            CourseStudentsResponse,
            EnrollmentItem,
            ModifyStudentsRequest,
            CourseOverview,
            DisciplineOverview,
            MyCoursesResponse,
            Discipline,
            DisciplinesResponse,
            TeachersResponse,
            ExamSignUpRequest,
            ExamSignUpResponse,
            GradeExamRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Courses", description = "Course creation, enrollment and listings"),
        (name = "Disciplines", description = "Disciplines and the teachers assigned to them"),
        (name = "Exams", description = "Exam sign-up and grading"),
        (name = "Users", description = "The authenticated caller")
    ),
    info(
        title = "Journal API",
        version = "0.1.0",
        description = "Academic records service: courses, enrollments, exams and grades behind role-based access.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
