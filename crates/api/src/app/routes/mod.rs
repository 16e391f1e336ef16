use axum::Router;

pub mod authorize;
pub mod books;
pub mod system;
pub mod users;

/// Router for all gate-protected endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/api/users", users::router())
        .nest("/api/books", books::router())
}
