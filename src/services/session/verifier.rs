use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a verified session.
///
/// Presence of this value means the requester is authenticated. The gate only
/// looks at `onboarding_complete`; the identity fields are handed to handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    // A token minted before onboarding existed has no flag: treat as unfinished.
    #[serde(
        default,
        rename = "onboardingComplete",
        alias = "onboarding_complete"
    )]
    pub onboarding_complete: bool,
    pub exp: u64,
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("session token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}

/// Turns the ambient credentials of a request into session claims.
///
/// Returns:
/// - `Ok(Some(_))` => valid session
/// - `Ok(None)`    => no credential on the request
/// - `Err(_)`      => credential present but unusable, or backend failure.
///   Callers must treat this exactly like `Ok(None)` (fail-closed).
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, headers: &HeaderMap) -> Result<Option<SessionClaims>, VerifyError>;
}
