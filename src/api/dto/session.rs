use serde::Serialize;

use crate::api::extractors::SessionCtx;

/// Body of `GET /api/auth/session` for a signed-in user.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
    /// RFC 3339
    pub expires: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub onboarding_complete: bool,
}

impl From<SessionCtx> for SessionResponse {
    fn from(ctx: SessionCtx) -> Self {
        Self {
            expires: ctx.expires_at.map(|t| t.to_rfc3339()),
            user: SessionUser {
                id: ctx.user_id,
                email: ctx.email,
                name: ctx.name,
                onboarding_complete: ctx.onboarding_complete,
            },
        }
    }
}
