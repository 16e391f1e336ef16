//! Request-gate middleware: the transport adapter around
//! [`librarium_auth::RequestGate`].
//!
//! Extracts the bearer token, runs the gate, and maps its terminal outcomes:
//! authentication failure → 401, permission denial → 403, success →
//! [`RequestPrincipal`] in the request extensions.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use librarium_auth::{AuthError, RequestGate};

use crate::context::RequestPrincipal;

#[derive(Clone)]
pub struct GateState {
    pub gate: Arc<RequestGate>,
}

pub async fn request_gate(
    State(state): State<GateState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let authed = state
        .gate
        .authorize_request(token, req.method(), req.uri().path())
        .await
        .map_err(|e| match e {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        })?;

    req.extensions_mut().insert(RequestPrincipal::new(authed));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
