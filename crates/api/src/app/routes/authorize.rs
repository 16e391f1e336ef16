//! Login: credential verification followed by token issuance.

use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use librarium_auth::verify_credentials;

use crate::app::dto::{LoginRequest, LoginResponse};
use crate::app::errors;
use crate::app::services::AppServices;

/// POST /api/authorize
///
/// Bad username and bad password produce the identical 401; the response
/// must not reveal which one it was.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let principal =
        match verify_credentials(services.users.as_ref(), &body.username, &body.password).await {
            Ok(p) => p,
            Err(e) => return errors::auth_error_to_response(e),
        };

    match services.issuer.issue(&principal) {
        Ok(token) => (
            StatusCode::OK,
            Json(LoginResponse {
                access_token: token,
                token_type: "Bearer".to_string(),
                expires_in: services.issuer.expires_in_secs(),
            }),
        )
            .into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}
