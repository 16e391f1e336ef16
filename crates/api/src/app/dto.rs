//! Request/response DTOs and JSON mapping.
//!
//! User fields use camelCase on the wire (`firstName`); existing clients
//! depend on that shape.

use serde::{Deserialize, Serialize};

use librarium_auth::Principal;
use librarium_catalog::Book;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Shared body of `POST /api/users` and `PUT /api/users/:id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchUserPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl From<&Principal> for UserResponse {
    fn from(p: &Principal) -> Self {
        Self {
            id: p.id.to_string(),
            username: p.username.clone(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            role: p.role.as_str().to_string(),
        }
    }
}

/// Shared body of `POST /api/books` and `PUT /api/books/:id`.
#[derive(Debug, Deserialize)]
pub struct BookPayload {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub excerpt: String,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub excerpt: String,
}

impl From<&Book> for BookResponse {
    fn from(b: &Book) -> Self {
        Self {
            id: b.id.to_string(),
            isbn: b.isbn.clone(),
            title: b.title.clone(),
            author: b.author.clone(),
            excerpt: b.excerpt.clone(),
        }
    }
}
