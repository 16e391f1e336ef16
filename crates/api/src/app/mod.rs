//! HTTP application wiring (axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: store/issuer wiring shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};

use librarium_auth::{
    AuthConfig, AuthConfigError, PermissionTable, PrincipalStore, RequestGate, TokenIssuer,
    TokenVerifier,
};
use librarium_catalog::BookStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// The login route and health probe are public; everything under
/// `/api/users` and `/api/books` sits behind the request gate.
pub fn build_app(
    config: AuthConfig,
    users: Arc<dyn PrincipalStore>,
    books: Arc<dyn BookStore>,
) -> Result<Router, AuthConfigError> {
    let issuer = TokenIssuer::new(&config)?;
    let verifier = TokenVerifier::new(&config)?;
    let gate = Arc::new(RequestGate::new(
        verifier,
        PermissionTable::default_policy(),
        users.clone(),
    ));

    let services = Arc::new(services::AppServices {
        users,
        books,
        issuer,
    });

    let protected = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            middleware::GateState { gate },
            middleware::request_gate,
        ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/authorize", post(routes::authorize::login))
        .layer(Extension(services))
        .merge(protected))
}
