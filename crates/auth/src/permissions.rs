//! Static role → resource permission table and the evaluation ladder.
//!
//! The table is built once at startup and read-only thereafter. Resource
//! paths form a small closed set matched by exact prefix on a segment
//! boundary; there is no wildcard or hierarchical matching, and exactly one
//! rule exists per (role, resource).

use std::collections::{HashMap, HashSet};

use http::Method;
use serde::{Deserialize, Serialize};

use librarium_core::UserId;

use crate::Role;

/// Resource prefix for user records.
pub const USERS_RESOURCE: &str = "/api/users";
/// Resource prefix for the book catalog.
pub const BOOKS_RESOURCE: &str = "/api/books";

/// Target narrowing of a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Any target of the resource type.
    #[serde(rename = "ALL")]
    All,
    /// Only targets whose identifier equals the requester's own id.
    #[serde(rename = "SELF")]
    SelfOnly,
}

/// Allowed methods and scope for one (role, resource) pair.
#[derive(Debug, Clone)]
struct ResourceRule {
    methods: HashSet<Method>,
    scope: Scope,
}

/// Immutable role-scoped permission lookup.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    grants: HashMap<Role, HashMap<String, ResourceRule>>,
}

impl PermissionTable {
    pub fn builder() -> PermissionTableBuilder {
        PermissionTableBuilder::default()
    }

    /// The shipped policy:
    ///
    /// | role      | /api/users                    | /api/books                |
    /// |-----------|-------------------------------|---------------------------|
    /// | ADMIN     | GET POST PUT DELETE PATCH ALL | GET POST PUT DELETE ALL   |
    /// | LIBRARIAN | GET PATCH ALL                 | GET POST PUT DELETE ALL   |
    /// | READER    | GET PATCH SELF                | GET ALL                   |
    pub fn default_policy() -> Self {
        Self::builder()
            .grant(
                Role::Admin,
                USERS_RESOURCE,
                &[
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::PATCH,
                ],
                Scope::All,
            )
            .grant(
                Role::Admin,
                BOOKS_RESOURCE,
                &[Method::GET, Method::POST, Method::PUT, Method::DELETE],
                Scope::All,
            )
            .grant(
                Role::Librarian,
                USERS_RESOURCE,
                &[Method::GET, Method::PATCH],
                Scope::All,
            )
            .grant(
                Role::Librarian,
                BOOKS_RESOURCE,
                &[Method::GET, Method::POST, Method::PUT, Method::DELETE],
                Scope::All,
            )
            .grant(
                Role::Reader,
                USERS_RESOURCE,
                &[Method::GET, Method::PATCH],
                Scope::SelfOnly,
            )
            .grant(Role::Reader, BOOKS_RESOURCE, &[Method::GET], Scope::All)
            .build()
    }

    /// Decide whether `role` may perform `method` on `path`.
    ///
    /// Deny-first ladder: unknown role, ungranted resource, and absent
    /// method all deny before scope is even considered. `SelfOnly` allows
    /// only when the path's trailing identifier segment parses to the
    /// requester's own id; a path with no target identifier (or one in an
    /// unexpected position) denies.
    pub fn is_permitted(
        &self,
        role: Role,
        path: &str,
        method: &Method,
        requester: UserId,
    ) -> bool {
        let Some(resources) = self.grants.get(&role) else {
            return false;
        };
        let Some((prefix, rule)) = resources
            .iter()
            .find(|(prefix, _)| path_matches(prefix, path))
        else {
            return false;
        };
        if !rule.methods.contains(method) {
            return false;
        }

        match rule.scope {
            Scope::All => true,
            Scope::SelfOnly => match target_segment(prefix, path) {
                Some(segment) => segment
                    .parse::<UserId>()
                    .map(|target| target == requester)
                    .unwrap_or(false),
                None => false,
            },
        }
    }
}

/// `path` is the resource itself or something nested directly under it.
fn path_matches(prefix: &str, path: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// The single trailing identifier segment, if the path carries one.
fn target_segment<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?.strip_prefix('/')?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(rest)
}

/// Builder for custom tables (tests, alternative deployments).
#[derive(Debug, Default)]
pub struct PermissionTableBuilder {
    grants: HashMap<Role, HashMap<String, ResourceRule>>,
}

impl PermissionTableBuilder {
    /// Add one (role, resource) rule. A repeated pair replaces the earlier
    /// rule, preserving the one-entry-per-pair invariant.
    pub fn grant(
        mut self,
        role: Role,
        resource: impl Into<String>,
        methods: &[Method],
        scope: Scope,
    ) -> Self {
        let rule = ResourceRule {
            methods: methods.iter().cloned().collect(),
            scope,
        };
        self.grants.entry(role).or_default().insert(resource.into(), rule);
        self
    }

    pub fn build(self) -> PermissionTable {
        PermissionTable {
            grants: self.grants,
        }
    }
}
