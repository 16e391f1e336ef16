use std::sync::Arc;

use librarium_auth::{PrincipalStore, TokenIssuer};
use librarium_catalog::BookStore;

/// Shared per-process services, injected into handlers as an `Extension`.
///
/// Stores are trait objects so the dev in-memory implementations and any
/// future persistent ones wire in identically.
pub struct AppServices {
    pub users: Arc<dyn PrincipalStore>,
    pub books: Arc<dyn BookStore>,
    pub issuer: TokenIssuer,
}
