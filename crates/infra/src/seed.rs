//! Startup seed data for dev and black-box tests.
//!
//! Three accounts (password equals username) spanning every role, and three
//! catalog entries. Stores start empty, so seeding is not guarded against
//! duplicates.

use librarium_auth::{Principal, PrincipalStore, Role, StoredUser, hash_password};
use librarium_catalog::{Book, BookStore};
use librarium_core::UserId;

pub async fn seed_demo_data(
    users: &dyn PrincipalStore,
    books: &dyn BookStore,
) -> Result<(), bcrypt::BcryptError> {
    seed_users(users).await?;
    seed_books(books).await;
    Ok(())
}

async fn seed_users(users: &dyn PrincipalStore) -> Result<(), bcrypt::BcryptError> {
    let accounts = [
        ("admin", "Admin", Role::Admin),
        ("librarian", "Librarian", Role::Librarian),
        ("reader", "Reader", Role::Reader),
    ];

    for (username, last_name, role) in accounts {
        let principal = Principal {
            id: UserId::new(),
            username: username.to_string(),
            first_name: "Library".to_string(),
            last_name: last_name.to_string(),
            role,
        };
        let hash = hash_password(username)?;
        users.insert(StoredUser::new(principal, hash)).await;
        tracing::debug!(username, role = role.as_str(), "seeded user");
    }

    Ok(())
}

async fn seed_books(books: &dyn BookStore) {
    let entries = [
        Book::new(
            "9789384323097",
            "Introduction to Algorithms",
            "Thomas H. Cormen, Charles E. Leiserson, Ronald L. Rivest, Clifford Stein",
            "Also known as CLRS, it goes in-depth into a range of algorithms \
             divided across several self-contained chapters.",
        ),
        Book::new(
            "0134314301",
            "Structure and Interpretation of Computer Programs (SICP)",
            "Harold Abelson, Gerald Jay Sussman, Julie Sussman",
            "Employed as a foundational course to programming at MIT, SICP is a \
             generic programming book that uses Scheme to illustrate the various \
             programming concepts.",
        ),
        Book::new(
            "9780321714114",
            "Design Patterns: Elements of Reusable Object-Oriented Software",
            "Erich Gamma, Richard Helm, Ralph Johnson, John Vlissides",
            "One of the authority tomes on software design patterns. And no, it \
             is not an easy read.",
        ),
    ];

    for book in entries {
        books.insert(book).await;
    }
}
