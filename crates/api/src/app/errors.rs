use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use librarium_auth::AuthError;
use librarium_core::DomainError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::InvalidCredentials => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", err.to_string())
        }
        AuthError::Unauthenticated => {
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", err.to_string())
        }
        AuthError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()),
        AuthError::Issuance(msg) => {
            tracing::error!(error = %msg, "token issuance failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "issuance_error",
                "could not issue token",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}
