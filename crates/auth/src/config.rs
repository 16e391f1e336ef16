use jsonwebtoken::Algorithm;

/// Immutable auth configuration, loaded once at process start.
///
/// There is no process-wide singleton: the value is passed into
/// [`crate::TokenIssuer`]/[`crate::TokenVerifier`] at construction time.
///
/// The signature scheme is asymmetric by requirement: issuer and any future
/// verifying service must not share a secret.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// PEM-encoded RSA private key (signing).
    pub private_key_pem: String,
    /// PEM-encoded RSA public key (verification).
    pub public_key_pem: String,
    /// Fixed `iss` claim value.
    pub issuer: String,
    /// Fixed `aud` claim value.
    pub audience: String,
    /// Token lifetime in milliseconds.
    pub token_lifetime_ms: i64,
    /// Signature algorithm.
    pub algorithm: Algorithm,
}

const DEFAULT_ISSUER: &str = "http://localhost:3005";
const DEFAULT_LIFETIME_MS: i64 = 60 * 60 * 1000;

impl AuthConfig {
    /// Create a configuration with the given keypair and default issuer,
    /// audience, lifetime (1 hour), and algorithm (RS512).
    pub fn new(private_key_pem: impl Into<String>, public_key_pem: impl Into<String>) -> Self {
        Self {
            private_key_pem: private_key_pem.into(),
            public_key_pem: public_key_pem.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_ISSUER.to_string(),
            token_lifetime_ms: DEFAULT_LIFETIME_MS,
            algorithm: Algorithm::RS512,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_lifetime_ms(mut self, lifetime_ms: i64) -> Self {
        self.token_lifetime_ms = lifetime_ms;
        self
    }

    /// Token lifetime as a chrono duration (whole-second JWT timestamps
    /// truncate any sub-second remainder at issuance).
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.token_lifetime_ms)
    }
}
