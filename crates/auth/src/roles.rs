use serde::{Deserialize, Serialize};

/// Role of a principal.
///
/// Roles are a closed set: authorization is driven entirely by the static
/// permission table, so an unknown role name has nothing it could map to.
/// The wire form is UPPERCASE (`"ADMIN"`), matching the stored user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full management of users and books.
    Admin,
    /// Manages the catalog; limited user visibility.
    Librarian,
    /// Reads the catalog; sees only their own user record.
    Reader,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Librarian => "LIBRARIAN",
            Role::Reader => "READER",
        }
    }

    /// Parse a role name, case-insensitively. Unknown names are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "LIBRARIAN" => Some(Role::Librarian),
            "READER" => Some(Role::Reader),
            _ => None,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
