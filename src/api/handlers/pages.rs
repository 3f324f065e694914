//! HTML pages behind the gate.
//!
//! Markup is static: the pages never echo request or session data, so there
//! is nothing to escape. The dashboard shell is the frame (header, nav,
//! sign-out) that dashboard content renders into.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
};

use crate::api::extractors::SessionCtxExtractor;
use crate::state::AppState;

const NAV: [(&str, &str); 2] = [("Dashboard", "/dashboard"), ("Account", "/api/me")];

fn document(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\
<html lang=\"en\">\
<head><meta charset=\"utf-8\"><title>{title}</title>\
<link rel=\"stylesheet\" href=\"/static/app.css\"></head>\
<body>{body}</body>\
</html>"
    ))
}

fn dashboard_shell(title: &str, main: &str) -> Html<String> {
    let nav: String = NAV
        .iter()
        .map(|(label, href)| format!("<li><a href=\"{href}\">{label}</a></li>"))
        .collect();

    document(
        title,
        &format!(
            "<div class=\"shell\">\
<header class=\"shell-header\"><span class=\"brand\">Gatehouse</span>\
<form method=\"post\" action=\"/api/auth/signout\"><button type=\"submit\">Sign out</button></form>\
</header>\
<nav class=\"shell-nav\"><ul>{nav}</ul></nav>\
<main class=\"shell-main\">{main}</main>\
</div>"
        ),
    )
}

/// Form posting to the session service mounted under `/api/auth`.
///
/// That service issues the session cookie; this app only reads it, so the
/// form targets are not routed here.
fn credentials_form(heading: &str, action: &str, submit: &str) -> String {
    format!(
        "<main class=\"auth\"><h1>{heading}</h1>\
<p class=\"note\">Sign-in is handled by the session service at <code>/api/auth</code>.</p>\
<form method=\"post\" action=\"{action}\">\
<label>Email <input type=\"email\" name=\"email\" required></label>\
<label>Password <input type=\"password\" name=\"password\" required></label>\
<button type=\"submit\">{submit}</button>\
</form></main>"
    )
}

pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Redirect::temporary(&state.routes().dashboard_path)
}

/// Posts to the session service's credentials callback (served outside this app).
pub async fn login() -> Html<String> {
    document(
        "Sign in",
        &credentials_form("Sign in", "/api/auth/callback/credentials", "Sign in"),
    )
}

/// Posts to the session service's registration endpoint (served outside this app).
pub async fn register() -> Html<String> {
    document(
        "Create account",
        &credentials_form("Create account", "/api/auth/register", "Create account"),
    )
}

pub async fn dashboard(_session: SessionCtxExtractor) -> Html<String> {
    dashboard_shell(
        "Dashboard",
        "<h1>Dashboard</h1><p>Everything is set up. Pick a section from the menu.</p>",
    )
}

pub async fn onboarding(_session: SessionCtxExtractor) -> Html<String> {
    document(
        "Welcome",
        "<main class=\"onboarding\"><h1>Finish setting up your account</h1>\
<p>Complete the steps below to reach your dashboard.</p></main>",
    )
}
