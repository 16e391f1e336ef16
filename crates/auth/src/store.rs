use async_trait::async_trait;

use librarium_core::UserId;

use crate::principal::{Principal, StoredUser};

/// Principal lookup and user-management seam.
///
/// Absence is a value (`None`), never an error: the core treats every lookup
/// as fallible-by-absence and fails closed on `None`. Implementations live
/// in `librarium-infra`; the core never touches storage directly.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Credential record for a username (login path).
    async fn find_by_username(&self, username: &str) -> Option<StoredUser>;

    /// Resolve a token subject to its principal (verification path).
    async fn find_by_id(&self, id: UserId) -> Option<Principal>;

    /// Full record including the credential hash (user management).
    async fn find_record(&self, id: UserId) -> Option<StoredUser>;

    async fn list(&self) -> Vec<Principal>;

    async fn insert(&self, user: StoredUser);

    /// Replace an existing record. Returns false if the id is unknown.
    async fn update(&self, user: StoredUser) -> bool;

    /// Remove a record. Returns false if the id is unknown.
    async fn remove(&self, id: UserId) -> bool;
}
