//! Per-request orchestration: authenticate, then authorize.
//!
//! State machine per request:
//! `START → AUTHENTICATING → {AUTHENTICATED → AUTHORIZING → {ALLOWED} |
//! DENIED} | REJECTED`. Terminal outcomes map to: allowed (dispatch),
//! [`AuthError::Unauthenticated`] (401), [`AuthError::Forbidden`] (403).
//! The gate short-circuits on the first failure and never partially
//! authorizes; once evaluation starts it runs to a decision.

use std::sync::Arc;

use http::Method;

use librarium_core::UserId;

use crate::error::AuthError;
use crate::permissions::PermissionTable;
use crate::principal::Principal;
use crate::roles::Role;
use crate::store::PrincipalStore;
use crate::token::TokenVerifier;

/// Outcome of a successful gate pass, for injection into request context.
///
/// `role` is the token's `scope` claim, not the principal's current role: a
/// role change on the stored principal takes effect only when a new token is
/// issued. That staleness window is deliberate; do not "fix" it by re-reading
/// the stored role, it would change observable request semantics.
#[derive(Debug, Clone)]
pub struct AuthenticatedRequest {
    pub principal: Principal,
    pub role: Role,
}

/// Gates every protected request. Immutable after construction; safe to
/// share across concurrent requests.
pub struct RequestGate {
    verifier: TokenVerifier,
    table: PermissionTable,
    principals: Arc<dyn PrincipalStore>,
}

impl RequestGate {
    pub fn new(
        verifier: TokenVerifier,
        table: PermissionTable,
        principals: Arc<dyn PrincipalStore>,
    ) -> Self {
        Self {
            verifier,
            table,
            principals,
        }
    }

    /// Authenticate the bearer token, resolve its subject, and evaluate the
    /// permission table for `method` on `path`.
    ///
    /// A subject deleted after issuance fails authentication even though the
    /// signature is still valid; the resolved identity is not cached beyond
    /// this call.
    pub async fn authorize_request(
        &self,
        token: &str,
        method: &Method,
        path: &str,
    ) -> Result<AuthenticatedRequest, AuthError> {
        let claims = self.verifier.decode(token)?;

        let subject: UserId = claims
            .subject_id()
            .map_err(|_| AuthError::Unauthenticated)?;

        let Some(principal) = self.principals.find_by_id(subject).await else {
            tracing::debug!(%subject, "token subject no longer resolves to a principal");
            return Err(AuthError::Unauthenticated);
        };

        if !self.table.is_permitted(claims.scope, path, method, subject) {
            tracing::debug!(
                %subject,
                role = claims.scope.as_str(),
                %method,
                path,
                "request denied by permission table"
            );
            return Err(AuthError::Forbidden);
        }

        Ok(AuthenticatedRequest {
            principal,
            role: claims.scope,
        })
    }
}
