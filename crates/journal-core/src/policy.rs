//! Route access policy.
//!
//! An [`AccessPolicy`] maps a literal route identifier to the roles allowed to
//! call it. Lookups are exact string matches against the identifier used at
//! registration time, never against the concrete request path, so handlers
//! must check with the same constant the router registered. Unregistered
//! routes are denied.
//!
//! ```ignore
//! use journal_core::{AccessPolicy, Role, routes};
//!
//! let policy = AccessPolicy::builder()
//!     .register(routes::COURSES_CREATE, &[Role::Admin])
//!     .build();
//!
//! assert!(policy.is_allowed(routes::COURSES_CREATE, Role::Admin));
//! assert!(!policy.is_allowed(routes::COURSES_CREATE, Role::Student));
//! ```

use std::collections::{HashMap, HashSet};

use crate::role::Role;

/// Route identifiers shared by the router and the policy table.
pub mod routes {
    pub const COURSES: &str = "/courses";
    pub const COURSES_CREATE: &str = "/courses/create";
    pub const COURSE_STUDENTS_MODIFY: &str = "/courses/{course_id}/modify/students";
    pub const COURSE_STUDENTS: &str = "/courses/{course_id}/students";
    pub const COURSE_DISCIPLINES: &str = "/courses/{course_id}/disciplines";
    pub const DISCIPLINE_TEACHERS: &str =
        "/courses/{course_id}/disciplines/{discipline_id}/teachers";
    pub const DISCIPLINES: &str = "/disciplines";
    pub const EXAMS_SIGN_UP: &str = "/exams/sign-up";
    pub const EXAMS_GRADE: &str = "/exams/grade";
    pub const ME: &str = "/me";
}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: HashMap<String, HashSet<Role>>,
}

impl AccessPolicy {
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder::default()
    }

    pub fn is_allowed(&self, route: &str, role: Role) -> bool {
        self.rules
            .get(route)
            .is_some_and(|roles| roles.contains(&role))
    }

    pub fn allowed_roles(&self, route: &str) -> Vec<Role> {
        let mut roles: Vec<Role> = self
            .rules
            .get(route)
            .map(|roles| roles.iter().copied().collect())
            .unwrap_or_default();
        roles.sort_by_key(|role| role.as_str());
        roles
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct AccessPolicyBuilder {
    rules: HashMap<String, HashSet<Role>>,
}

impl AccessPolicyBuilder {
    /// Registering a route again replaces its role set.
    pub fn register(mut self, route: impl Into<String>, roles: &[Role]) -> Self {
        self.rules
            .insert(route.into(), roles.iter().copied().collect());
        self
    }

    pub fn build(self) -> AccessPolicy {
        AccessPolicy { rules: self.rules }
    }
}
