//! Token issuance and verification.
//!
//! Both sides are built once from [`AuthConfig`] and are pure functions of
//! their inputs plus the clock: the issuer holds the RSA signing key and the
//! fixed claim values, the verifier holds the public key and a pinned
//! `Validation` (issuer, audience, expiry, not-before, zero leeway).

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};

use crate::claims::{Claims, validate_window};
use crate::config::AuthConfig;
use crate::error::{AuthConfigError, AuthError};
use crate::principal::Principal;

/// Builds and signs bounded-lifetime identity assertions.
#[derive(Clone)]
pub struct TokenIssuer {
    header: Header,
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
    lifetime: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthConfigError> {
        let encoding_key = EncodingKey::from_rsa_pem(config.private_key_pem.as_bytes())?;
        Ok(Self {
            header: Header::new(config.algorithm),
            encoding_key,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            lifetime: config.lifetime(),
        })
    }

    /// Issue a signed assertion of the principal's identity and role.
    ///
    /// Signing failure is an internal fault for this call. Surfaced, never
    /// retried.
    pub fn issue(&self, principal: &Principal) -> Result<String, AuthError> {
        self.issue_at(principal, Utc::now())
    }

    /// Seconds until a token issued now expires (login response metadata).
    pub fn expires_in_secs(&self) -> u64 {
        self.lifetime.num_seconds().max(0) as u64
    }

    pub(crate) fn issue_at(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let exp = (now + self.lifetime).timestamp();

        let claims = Claims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: principal.id.to_string(),
            scope: principal.role,
            iat,
            nbf: iat,
            exp,
        };

        jsonwebtoken::encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AuthError::Issuance(e.to_string()))
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

/// Validates presented assertions back into their claim set.
///
/// Every check is a hard gate: signature, issuer, audience, and the
/// `[iat, exp)` window all collapse into [`AuthError::Unauthenticated`] on
/// failure; callers learn nothing about which gate tripped. Subject
/// resolution is the gate's job ([`crate::RequestGate`]).
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthConfigError> {
        let decoding_key = DecodingKey::from_rsa_pem(config.public_key_pem.as_bytes())?;

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_nbf = true;
        validation.leeway = 0;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Decode and validate a raw token. Any failure is `Unauthenticated`.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "token has expired",
                    ErrorKind::ImmatureSignature => "token not yet valid",
                    ErrorKind::InvalidSignature => "invalid signature",
                    ErrorKind::InvalidIssuer => "issuer mismatch",
                    ErrorKind::InvalidAudience => "audience mismatch",
                    _ => "token validation failed",
                };
                tracing::debug!(reason, error = %e, "token rejected");
                AuthError::Unauthenticated
            })?;

        // Explicit [iat, exp) window on top of the library's exp/nbf checks.
        validate_window(&data.claims, Utc::now()).map_err(|e| {
            tracing::debug!(error = %e, "token rejected by time window");
            AuthError::Unauthenticated
        })?;

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}
