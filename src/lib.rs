//! # Journal API
//!
//! An academic records service built with Axum and SQLite. Admins create
//! courses and enroll students, teachers grade exams, students sign up for
//! them, and everyone can list the courses they belong to.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Authentication and route access extractors
//! ├── modules/          # Feature modules
//! │   ├── assignments/ # (course, discipline, teacher) lookups
//! │   ├── courses/     # Course creation, enrollment, "my courses"
//! │   ├── disciplines/ # Discipline listings
//! │   ├── exams/       # Exam sign-up and grading
//! │   └── users/       # Caller resolution and /me
//! └── validator.rs      # JSON body extractors
//! ```
//!
//! Each feature module splits into `controller.rs` (HTTP handlers),
//! `service.rs` (SQL) and `router.rs`. Shared types live in the workspace
//! crates:
//!
//! - [`journal_core`]: error taxonomy, status envelope, roles, access policy
//! - [`journal_config`]: environment configuration
//! - [`journal_db`]: SQLite pool
//! - [`journal_auth`]: JWT verification and the encrypted role cookie
//! - [`journal_models`]: rows and DTOs
//! - [`journal_observability`]: tracing and Prometheus metrics
//!
//! ## Authentication
//!
//! Every route except `/health`, `/metrics` and the API docs requires an
//! HMAC-signed bearer token carrying an `email` claim. The caller's id and
//! role are cached client-side in an AES-GCM encrypted `role` cookie and
//! looked up in the database only when the cookie is absent, unreadable or
//! issued for a different email.
//!
//! ## Responses
//!
//! Bodies always carry `{"status": "OK"}` or `{"status": "Error", "error": "..."}`.
//! Only authorization failures change the HTTP status (401).

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use journal_auth;
pub use journal_config;
pub use journal_core;
pub use journal_db;
pub use journal_models;
