//! Strongly-typed ID newtypes for domain entities.
//!
//! Every table uses SQLite `INTEGER PRIMARY KEY` ids. Wrapping them keeps a
//! `CourseId` from being passed where a `UserId` is expected while staying a
//! plain integer on the wire and in the database.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        #[schema(value_type = i64)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a row in `users`.
    UserId
);
define_id!(CourseId);
define_id!(DisciplineId);
define_id!(
    /// Identifier of a (course, discipline, teacher) binding.
    AssignmentId
);
define_id!(EnrollmentId);
define_id!(ExamId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&CourseId::new(7)).unwrap(), "7");
        let id: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(id, UserId::new(42));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("12".parse::<CourseId>(), Ok(CourseId::new(12)));
        assert!("abc".parse::<CourseId>().is_err());
        assert!("".parse::<CourseId>().is_err());
    }

    #[test]
    fn test_debug_names_the_type() {
        assert_eq!(format!("{:?}", ExamId::new(3)), "ExamId(3)");
    }
}
