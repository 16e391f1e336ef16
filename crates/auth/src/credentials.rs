//! Credential verification (login path).
//!
//! Known gap, deliberate: no rate limiting or lockout here. That belongs to
//! an outer layer if ever added.

use crate::error::AuthError;
use crate::principal::Principal;
use crate::store::PrincipalStore;

/// Bcrypt cost used when hashing new passwords.
pub const HASH_COST: u32 = 10;

/// Verify a username/password pair against the stored credential.
///
/// Unknown username and wrong password return the same error: the two cases
/// must be indistinguishable at the API boundary. No side effects.
pub async fn verify_credentials(
    store: &dyn PrincipalStore,
    username: &str,
    password: &str,
) -> Result<Principal, AuthError> {
    let Some(record) = store.find_by_username(username).await else {
        tracing::debug!(username, "login rejected: unknown username");
        return Err(AuthError::InvalidCredentials);
    };

    // A malformed stored hash also fails closed.
    let matches = bcrypt::verify(password, &record.password_hash).unwrap_or(false);
    if !matches {
        tracing::debug!(username, "login rejected: password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(record.principal)
}

/// Hash a new password with the external hashing collaborator.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, HASH_COST)
}
