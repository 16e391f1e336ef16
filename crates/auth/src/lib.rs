//! `librarium-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: transport
//! adapters live in `librarium-api`, and principal lookups only enter through
//! the [`PrincipalStore`] trait.
//!
//! Login path: [`verify_credentials`] → [`TokenIssuer`].
//! Protected-request path: [`TokenVerifier`] → [`PermissionTable`] →
//! [`RequestGate`].

pub mod claims;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod store;
pub mod token;

pub use claims::{Claims, TokenValidationError, validate_window};
pub use config::AuthConfig;
pub use credentials::{hash_password, verify_credentials};
pub use error::{AuthConfigError, AuthError};
pub use gate::{AuthenticatedRequest, RequestGate};
pub use permissions::{PermissionTable, PermissionTableBuilder, Scope};
pub use principal::{Principal, StoredUser};
pub use roles::Role;
pub use store::PrincipalStore;
pub use token::{TokenIssuer, TokenVerifier};
