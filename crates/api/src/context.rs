use librarium_auth::{AuthenticatedRequest, Principal, Role};
use librarium_core::UserId;

/// Authenticated identity for a request, injected by the gate middleware.
///
/// `role` is the role the token carried, which authorization already used;
/// handlers must not re-derive it from the principal.
#[derive(Debug, Clone)]
pub struct RequestPrincipal {
    principal: Principal,
    role: Role,
}

impl RequestPrincipal {
    pub fn new(authed: AuthenticatedRequest) -> Self {
        Self {
            principal: authed.principal,
            role: authed.role,
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn id(&self) -> UserId {
        self.principal.id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
