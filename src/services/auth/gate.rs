//! Role check evaluated once per request before the handler runs.
use crate::services::auth::context::AuthCtx;
use crate::services::auth::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// No principal and a role is required (401).
    RejectUnauthenticated,
    /// Principal present but lacks the required role (403).
    RejectForbidden,
}

pub fn check(ctx: &AuthCtx, required: Option<&Role>) -> Decision {
    let Some(required) = required else {
        return Decision::Allow;
    };

    match ctx.principal() {
        None => Decision::RejectUnauthenticated,
        Some(principal) if principal.has_role(required) => Decision::Allow,
        Some(_) => Decision::RejectForbidden,
    }
}
