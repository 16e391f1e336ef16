//! Book catalog domain module.
//!
//! Deliberately thin: document schema and payload validation are outside
//! scope, so a book is a plain record plus the storage seam.

pub mod book;

pub use book::{Book, BookStore};
