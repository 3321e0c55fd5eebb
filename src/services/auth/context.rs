/*
 * Responsibility
 * - Request-scoped identity handed from the authentication middleware to
 *   extractors and handlers via request extensions
 * - No globals: each request carries its own AuthCtx value
 */
use serde::Serialize;

use crate::services::auth::roles::{Role, RoleSet};

/// The authenticated identity derived for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub username: String,
    pub roles: RoleSet,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

/// Security context for a single request.
///
/// The middleware writes at most one authenticated `AuthCtx` per request;
/// a request without one is anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCtx {
    principal: Option<Principal>,
}

impl AuthCtx {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn into_principal(self) -> Option<Principal> {
        self.principal
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}
