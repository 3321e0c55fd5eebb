//! Bearer token 検証 → AuthCtx を extensions に入れる
//!
//! - 失敗しても拒否しない。AuthCtx を消して匿名のまま次へ流す
//! - 拒否 (401/403) は Authorized extractor だけが行う
//! - すでに認証済みの AuthCtx があれば上書きしない (二重適用しても同じ結果)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::services::auth::{AuthCtx, AuthOutcome};
use crate::state::AppState;

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

pub async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if req
        .extensions()
        .get::<AuthCtx>()
        .is_some_and(AuthCtx::is_authenticated)
    {
        return next.run(req).await;
    }

    match state.auth.authenticate(req.headers()).await {
        AuthOutcome::Authenticated(principal) => {
            tracing::debug!(user = %principal.username, roles = principal.roles.len(), "authenticated");
            // middleware → extractor への受け渡し
            req.extensions_mut().insert(AuthCtx::authenticated(principal));
        }
        AuthOutcome::Unauthenticated(reason) => {
            tracing::trace!(reason = %reason, "continuing unauthenticated");
            req.extensions_mut().remove::<AuthCtx>();
        }
    }

    next.run(req).await
}
