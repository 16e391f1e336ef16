use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use librarium_core::{DomainError, UserId};

use crate::Role;

/// Claim set of an identity assertion (RFC 7519 field names).
///
/// Immutable once signed; expiry is the only termination mechanism (there
/// is no revocation list). Timestamps are epoch seconds; `nbf` is set equal
/// to `iat` so verifiers enforce the `[iat, exp)` validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer (fixed configuration value).
    pub iss: String,

    /// Audience (fixed configuration value).
    pub aud: String,

    /// Subject: the principal id, as a string.
    pub sub: String,

    /// Role carried by the token. Trusted at verification time without a
    /// re-fetch, so a role change only takes effect when the token is
    /// reissued.
    pub scope: Role,

    /// Issued-at, epoch seconds.
    pub iat: i64,

    /// Not-before, epoch seconds (equals `iat`).
    pub nbf: i64,

    /// Expiry, epoch seconds.
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a principal id.
    pub fn subject_id(&self) -> Result<UserId, DomainError> {
        self.sub.parse()
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued-at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically check the `[iat, exp)` validity window.
///
/// Signature, issuer, and audience verification happen in
/// [`crate::TokenVerifier`]; this is the pure time gate, kept separate so it
/// can be tested without key material.
pub fn validate_window(claims: &Claims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
