use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::SessionCtx;

/// Handler で SessionCtx を受け取るための extractor
/// gate middleware が SessionCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 (public path から呼ばれた・middleware 未設定)
pub struct SessionCtxExtractor(pub SessionCtx);

impl<S> FromRequestParts<S> for SessionCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionCtx>()
            .cloned()
            .map(SessionCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}
