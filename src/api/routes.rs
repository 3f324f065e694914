/*
 * Responsibility
 * - URL 構造の定義
 * - gate をかける範囲 (pages / api / static / fallback) と外す範囲 (/health) をここで決める
 */
use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::api::handlers::{health::health, pages, session};
use crate::error::AppError;
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState, static_dir: &Path) -> Router<AppState> {
    let gated = Router::new()
        .route("/", get(pages::root))
        .route("/login", get(pages::login))
        .route("/register", get(pages::register))
        .route("/dashboard", get(pages::dashboard))
        .route("/onboarding", get(pages::onboarding))
        .route("/api/auth/session", get(session::current_session))
        .route("/api/auth/signout", post(session::sign_out))
        .route("/api/me", get(session::me))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found);

    Router::new()
        .route("/health", get(health))
        .merge(middleware::gate::apply(gated, state))
}

async fn not_found() -> AppError {
    AppError::not_found("page")
}
