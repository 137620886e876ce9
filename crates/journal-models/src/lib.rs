//! # Journal Models
//!
//! Database rows and request/response DTOs for the journal service.
//!
//! Response types flatten a [`journal_core::Envelope`] next to their payload
//! so every body carries the `status` field.

pub mod assignments;
pub mod courses;
pub mod dates;
pub mod disciplines;
pub mod enrollments;
pub mod exams;
pub mod overview;
pub mod users;

pub use assignments::Assignment;
pub use courses::{Course, CourseStudentsResponse, CreateCourseRequest, CreateCourseResponse, Subject};
pub use disciplines::{Discipline, DisciplinesResponse, TeachersResponse};
pub use enrollments::{Enrollment, EnrollmentItem, ModifyStudentsRequest};
pub use exams::{Exam, ExamSignUpRequest, ExamSignUpResponse, Grade, GradeExamRequest};
pub use overview::{CourseOverview, DisciplineOverview, LatestGrade, MyCoursesResponse, OverviewRow};
pub use users::{MeResponse, NewUser, User};
