/*
 * Responsibility
 * - GET  /api/auth/session : 現在のセッション (なければ null)
 * - POST /api/auth/signout : セッション cookie を消して /login へ
 * - GET  /api/me           : gate 通過済みの SessionCtx を返す
 */
use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::api::dto::session::SessionResponse;
use crate::api::extractors::{SessionCtx, SessionCtxExtractor};
use crate::services::session::SECURE_COOKIE_PREFIX;
use crate::state::AppState;

/// `/api/auth` is public, so the gate never attached a session here: ask the
/// verifier directly. Failures read as signed out, same as in the gate.
pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<Option<SessionResponse>> {
    let session = state
        .gatekeeper
        .session(&headers)
        .await
        .map(|claims| SessionResponse::from(SessionCtx::from(claims)));

    Json(session)
}

pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = state
        .session_cookie_names()
        .into_iter()
        .fold(jar, |jar, name| {
            // browsers drop `__Secure-` cookies set without `Secure`, removal included
            let secure = name.starts_with(SECURE_COOKIE_PREFIX);
            let mut cookie = Cookie::build((name, "")).path("/").secure(secure).build();
            // `CookieJar::remove` only emits a removal for cookies the request carried
            cookie.make_removal();
            jar.add(cookie)
        });

    tracing::info!("session cookies cleared");

    (jar, Redirect::to(&state.routes().login_path))
}

pub async fn me(SessionCtxExtractor(ctx): SessionCtxExtractor) -> Json<SessionCtx> {
    Json(ctx)
}
