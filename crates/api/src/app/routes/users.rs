//! User management routes.
//!
//! Status semantics: 404 unknown id, 409 username conflicts, 201 create,
//! 204 delete. The gate has already decided authorization (including SELF
//! scope) before any handler runs.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use librarium_auth::{Principal, Role, StoredUser, hash_password};
use librarium_core::UserId;

use crate::app::dto::{PatchUserPayload, UserPayload, UserResponse};
use crate::app::errors::{domain_error_to_response, json_error};
use crate::app::services::AppServices;
use crate::context::RequestPrincipal;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .patch(patch_user)
                .delete(delete_user),
        )
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let users = services.users.list().await;
    let body: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Json(body).into_response()
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(e) => return domain_error_to_response(e),
    };

    match services.users.find_by_id(id).await {
        Some(principal) => Json(UserResponse::from(&principal)).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<RequestPrincipal>,
    Json(body): Json<UserPayload>,
) -> axum::response::Response {
    let Some(role) = Role::parse(&body.role) else {
        return json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "unknown role",
        );
    };

    if services
        .users
        .find_by_username(&body.username)
        .await
        .is_some()
    {
        return json_error(StatusCode::CONFLICT, "conflict", "username already taken");
    }

    let hash = match hash_password(&body.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!(error = %e, "password hashing failed");
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "hashing_error",
                "could not store credentials",
            );
        }
    };

    let principal = Principal {
        id: UserId::new(),
        username: body.username,
        first_name: body.first_name,
        last_name: body.last_name,
        role,
    };
    let response = UserResponse::from(&principal);
    tracing::info!(actor = %actor.id(), username = %principal.username, "user created");
    services.users.insert(StoredUser::new(principal, hash)).await;

    (StatusCode::CREATED, Json(response)).into_response()
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<UserPayload>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(e) => return domain_error_to_response(e),
    };

    if services.users.find_record(id).await.is_none() {
        return json_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    }

    // The new username must not belong to another user.
    if let Some(other) = services.users.find_by_username(&body.username).await {
        if other.id() != id {
            return json_error(StatusCode::CONFLICT, "conflict", "username already taken");
        }
    }

    let Some(role) = Role::parse(&body.role) else {
        return json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "unknown role",
        );
    };

    let hash = match hash_password(&body.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!(error = %e, "password hashing failed");
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "hashing_error",
                "could not store credentials",
            );
        }
    };

    let principal = Principal {
        id,
        username: body.username,
        first_name: body.first_name,
        last_name: body.last_name,
        role,
    };
    let response = UserResponse::from(&principal);
    services.users.update(StoredUser::new(principal, hash)).await;

    Json(response).into_response()
}

pub async fn patch_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<PatchUserPayload>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(e) => return domain_error_to_response(e),
    };

    let Some(mut record) = services.users.find_record(id).await else {
        return json_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    };

    if let Some(first_name) = body.first_name {
        record.principal.first_name = first_name;
    }
    if let Some(last_name) = body.last_name {
        record.principal.last_name = last_name;
    }
    if let Some(password) = body.password {
        record.password_hash = match hash_password(&password) {
            Ok(h) => h,
            Err(e) => {
                tracing::error!(error = %e, "password hashing failed");
                return json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "hashing_error",
                    "could not store credentials",
                );
            }
        };
    }

    let response = UserResponse::from(&record.principal);
    services.users.update(record).await;

    Json(response).into_response()
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<RequestPrincipal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(e) => return domain_error_to_response(e),
    };

    if !services.users.remove(id).await {
        return json_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    }

    tracing::info!(actor = %actor.id(), user = %id, "user deleted");
    StatusCode::NO_CONTENT.into_response()
}
