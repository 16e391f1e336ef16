use serde::{Deserialize, Serialize};

use librarium_core::UserId;

use crate::Role;

/// A resolved identity for authentication/authorization decisions.
///
/// Principals are created by user management and read-only here. The display
/// attributes carry no security meaning; decisions use only `id` and `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// A principal together with its credential (1:1).
///
/// The hash is bcrypt output from the external hashing collaborator; this
/// crate never sees a plaintext secret beyond the comparison call. Not
/// serializable so the hash cannot leak into a response body.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub principal: Principal,
    pub password_hash: String,
}

impl StoredUser {
    pub fn new(principal: Principal, password_hash: impl Into<String>) -> Self {
        Self {
            principal,
            password_hash: password_hash.into(),
        }
    }

    pub fn id(&self) -> UserId {
        self.principal.id
    }
}
