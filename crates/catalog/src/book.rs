use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use librarium_core::BookId;

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub excerpt: String,
}

impl Book {
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        excerpt: impl Into<String>,
    ) -> Self {
        Self {
            id: BookId::new(),
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            excerpt: excerpt.into(),
        }
    }
}

/// Catalog storage seam. Absence is a value, never an error.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self) -> Vec<Book>;

    async fn find_by_id(&self, id: BookId) -> Option<Book>;

    /// ISBN lookup backs the uniqueness check on create/update.
    async fn find_by_isbn(&self, isbn: &str) -> Option<Book>;

    async fn insert(&self, book: Book);

    /// Replace an existing record. Returns false if the id is unknown.
    async fn update(&self, book: Book) -> bool;

    /// Remove a record. Returns false if the id is unknown.
    async fn remove(&self, id: BookId) -> bool;
}
