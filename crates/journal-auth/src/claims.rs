//! JWT claim structures.

use serde::{Deserialize, Serialize};

/// Claims carried by a bearer token.
///
/// Only `email` is used to resolve the caller; `exp` must be present and in
/// the future for the token to verify. Other claims (`sub`, `aud`, ...) are
/// ignored whatever their JSON type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub email: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}
