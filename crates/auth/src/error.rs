//! Error taxonomy of the auth core.
//!
//! All four request-path variants are terminal: the core never retries, and
//! every ambiguity fails closed (deny).

use thiserror::Error;

/// Request-path authentication/authorization failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Login failed. Unknown username and wrong password deliberately
    /// collapse into this one signal to prevent username enumeration.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Missing, malformed, expired, or otherwise unverifiable token, or a
    /// subject that no longer resolves to a principal.
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated, but the role/path/method/scope combination is not
    /// permitted.
    #[error("forbidden")]
    Forbidden,

    /// A token could not be built for a resolved principal. Internal fault,
    /// surfaced as a server error.
    #[error("token issuance failed: {0}")]
    Issuance(String),
}

/// Startup-time configuration failure (bad key material).
#[derive(Debug, Error)]
pub enum AuthConfigError {
    #[error("invalid RSA key material: {0}")]
    InvalidKey(#[from] jsonwebtoken::errors::Error),
}
