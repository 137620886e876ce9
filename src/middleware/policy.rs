//! Route-level authorization.
//!
//! Each protected handler takes one `Require*` extractor naming the route
//! identifier it was registered under. The extractor runs before the body is
//! decoded, so a denied role is answered with 401 without touching the
//! database.

use journal_core::{AccessPolicy, Role, routes};
use tracing::debug;

/// The access table: which roles may call which route.
pub fn access_policy() -> AccessPolicy {
    use Role::{Admin, Student, Teacher};

    let policy = AccessPolicy::builder()
        .register(routes::COURSES_CREATE, &[Admin])
        .register(routes::COURSE_STUDENTS_MODIFY, &[Admin])
        .register(routes::COURSES, &[Admin, Teacher, Student])
        .register(routes::COURSE_STUDENTS, &[Admin, Teacher])
        .register(routes::COURSE_DISCIPLINES, &[Admin, Teacher, Student])
        .register(routes::DISCIPLINE_TEACHERS, &[Admin, Teacher, Student])
        .register(routes::DISCIPLINES, &[Admin, Teacher, Student])
        .register(routes::EXAMS_SIGN_UP, &[Student])
        .register(routes::EXAMS_GRADE, &[Teacher])
        .register(routes::ME, &[Admin, Teacher, Student])
        .build();

    for route in policy.routes() {
        debug!(route, roles = ?policy.allowed_roles(route), "access rule");
    }

    policy
}

/// Generates an extractor that yields the caller's [`journal_auth::AuthKey`]
/// only when the access policy allows their role on `$route`.
macro_rules! require_route {
    ($name:ident, $route:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub journal_auth::AuthKey);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = journal_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let $crate::middleware::auth::AuthUser(key) =
                    <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                        $crate::state::AppState,
                    >>::from_request_parts(parts, state)
                    .await?;

                if !state.policy.is_allowed($route, key.role) {
                    tracing::warn!(
                        user_id = %key.id,
                        role = %key.role,
                        route = $route,
                        allowed = ?state.policy.allowed_roles($route),
                        "access denied"
                    );
                    return Err(journal_core::AppError::unauthorized(format!(
                        "role {} may not access {}",
                        key.role, $route
                    )));
                }

                Ok($name(key))
            }
        }
    };
}

require_route!(RequireCoursesCreate, routes::COURSES_CREATE);
require_route!(RequireCourseStudentsModify, routes::COURSE_STUDENTS_MODIFY);
require_route!(RequireCoursesList, routes::COURSES);
require_route!(RequireCourseStudents, routes::COURSE_STUDENTS);
require_route!(RequireCourseDisciplines, routes::COURSE_DISCIPLINES);
require_route!(RequireDisciplineTeachers, routes::DISCIPLINE_TEACHERS);
require_route!(RequireDisciplinesList, routes::DISCIPLINES);
require_route!(RequireExamsSignUp, routes::EXAMS_SIGN_UP);
require_route!(RequireExamsGrade, routes::EXAMS_GRADE);
require_route!(RequireMe, routes::ME);
