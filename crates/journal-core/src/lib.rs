//! # Journal Core
//!
//! Types shared by every other crate in the workspace:
//!
//! - [`errors`]: the [`AppError`] taxonomy and its HTTP mapping
//! - [`ids`]: typed integer ids for every table
//! - [`response`]: the `{status, error?}` JSON envelope
//! - [`role`]: the closed [`Role`] enum
//! - [`policy`]: the route [`AccessPolicy`] and route identifiers

pub mod errors;
pub mod ids;
pub mod policy;
pub mod response;
pub mod role;

pub use errors::{AppError, ErrorKind, ResultExt};
pub use ids::{AssignmentId, CourseId, DisciplineId, EnrollmentId, ExamId, UserId};
pub use policy::{AccessPolicy, AccessPolicyBuilder, routes};
pub use response::{Envelope, Status};
pub use role::Role;
