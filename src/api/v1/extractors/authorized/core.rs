/*
 * Responsibility
 * - endpoint ごとの role 要求を型で宣言する (Authorized<Admin> など)
 * - AuthCtx を gate::check に通し、401 / 403 に変換する
 * - FromRequestParts なので body の extractor より先に評価される
 *
 * 置かないもの
 *  - Admin などの具体 role タグ (types.rs)
 */
use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::gate::{self, Decision};
use crate::services::auth::{AuthCtx, Principal, Role};

/// Tag type naming the role an endpoint requires.
pub trait RequiredRole: Send + Sync + 'static {
    fn role() -> Role;
}

pub struct Authorized<R> {
    pub principal: Principal,
    _marker: PhantomData<R>,
}

impl<R> Authorized<R> {
    fn new(principal: Principal) -> Self {
        Self {
            principal,
            _marker: PhantomData,
        }
    }
}

impl<S, R> FromRequestParts<S> for Authorized<R>
where
    S: Send + Sync,
    R: RequiredRole,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<AuthCtx>().cloned().unwrap_or_default();
        let required = R::role();

        match gate::check(&ctx, Some(&required)) {
            Decision::Allow => ctx
                .into_principal()
                .map(Self::new)
                .ok_or(AppError::Unauthorized),
            Decision::RejectUnauthenticated => {
                tracing::debug!(required = %required, path = %parts.uri.path(), "no principal");
                Err(AppError::Unauthorized)
            }
            Decision::RejectForbidden => {
                tracing::info!(
                    required = %required,
                    path = %parts.uri.path(),
                    user = ctx.principal().map(|p| p.username.as_str()).unwrap_or_default(),
                    "missing role"
                );
                Err(AppError::Forbidden)
            }
        }
    }
}

impl<R> std::fmt::Debug for Authorized<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorized")
            .field("principal", &self.principal)
            .finish()
    }
}
