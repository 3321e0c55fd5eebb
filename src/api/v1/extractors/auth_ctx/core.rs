use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::services::auth::AuthCtx;

/// Handler で AuthCtx を受け取るための extractor
/// middleware が認証に成功した場合のみ AuthCtx が入っている
/// 見つからない場合は匿名として扱う（拒否するのは Authorized 側）
#[derive(Debug, Clone)]
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthCtxExtractor(
            parts.extensions.get::<AuthCtx>().cloned().unwrap_or_default(),
        ))
    }
}
