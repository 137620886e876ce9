use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use journal_core::{Role, UserId};

/// The resolved caller: who they are and which role they act under.
///
/// Attached to every authenticated request and cached client-side in the
/// encrypted `role` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthKey {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}
