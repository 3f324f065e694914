/*
 * Responsibility
 * - Handler から見える「ログイン済みコンテキスト」の型
 * - gate middleware が検証済み claims から作って request extensions に格納する
 *
 * Notes
 * - token の検証は services::session 側の責務
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::session::SessionClaims;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCtx {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub onboarding_complete: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<SessionClaims> for SessionCtx {
    fn from(claims: SessionClaims) -> Self {
        let expires_at = i64::try_from(claims.exp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Self {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            onboarding_complete: claims.onboarding_complete,
            expires_at,
        }
    }
}
