//! In-memory store implementations.
//!
//! `RwLock<HashMap>` with clone-out reads; locks are held only for the map
//! operation, never across awaits. A poisoned lock degrades to "absent"
//! rather than panicking the request path.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use librarium_auth::{Principal, PrincipalStore, StoredUser};
use librarium_catalog::{Book, BookStore};
use librarium_core::{BookId, UserId};

/// In-memory user directory.
#[derive(Debug, Default)]
pub struct InMemoryPrincipalStore {
    inner: RwLock<HashMap<UserId, StoredUser>>,
}

impl InMemoryPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrincipalStore for InMemoryPrincipalStore {
    async fn find_by_username(&self, username: &str) -> Option<StoredUser> {
        let map = self.inner.read().ok()?;
        map.values()
            .find(|u| u.principal.username == username)
            .cloned()
    }

    async fn find_by_id(&self, id: UserId) -> Option<Principal> {
        let map = self.inner.read().ok()?;
        map.get(&id).map(|u| u.principal.clone())
    }

    async fn find_record(&self, id: UserId) -> Option<StoredUser> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    async fn list(&self) -> Vec<Principal> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.values().map(|u| u.principal.clone()).collect()
    }

    async fn insert(&self, user: StoredUser) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(user.id(), user);
        }
    }

    async fn update(&self, user: StoredUser) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.insert(user.id(), user).is_some(),
            Err(_) => false,
        }
    }

    async fn remove(&self, id: UserId) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(&id).is_some(),
            Err(_) => false,
        }
    }
}

/// In-memory book catalog.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    inner: RwLock<HashMap<BookId, Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn list(&self) -> Vec<Book> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.values().cloned().collect()
    }

    async fn find_by_id(&self, id: BookId) -> Option<Book> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    async fn find_by_isbn(&self, isbn: &str) -> Option<Book> {
        let map = self.inner.read().ok()?;
        map.values().find(|b| b.isbn == isbn).cloned()
    }

    async fn insert(&self, book: Book) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(book.id, book);
        }
    }

    async fn update(&self, book: Book) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.insert(book.id, book).is_some(),
            Err(_) => false,
        }
    }

    async fn remove(&self, id: BookId) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(&id).is_some(),
            Err(_) => false,
        }
    }
}
