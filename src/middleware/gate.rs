//! セッション gate → 通過時は SessionCtx を extensions に入れる
//!
//! - 除外 path (静的ファイル等) は gate を通さずそのまま流す
//! - Redirect は 307 (method/body を保ったまま)
//! - 通過 + セッションありの場合のみ SessionCtx を挿入する

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};

use crate::api::extractors::SessionCtx;
use crate::state::AppState;

/// Put the gate in front of every route of `router`.
///
/// Apply to the top-level page router, not to a nested one: the gate needs the
/// full path (it reads `OriginalUri` anyway).
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = original_uri.path();

    if state.routes().is_excluded(path) {
        return next.run(req).await;
    }

    let outcome = state.gatekeeper.evaluate(path, req.headers()).await;

    if let Some(location) = outcome.decision.location() {
        return Redirect::temporary(location).into_response();
    }

    // middleware → extractor への受け渡し
    if let Some(claims) = outcome.session {
        req.extensions_mut().insert(SessionCtx::from(claims));
    }

    next.run(req).await
}
