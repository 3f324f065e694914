pub mod factory;
pub mod jwt;
pub mod verifier;

pub use factory::build_session_verifier;
pub use jwt::JwtSessionVerifier;
pub use verifier::{SessionClaims, SessionVerifier, VerifyError};

/// Prefix browsers require for cookies set with `Secure` over HTTPS.
pub const SECURE_COOKIE_PREFIX: &str = "__Secure-";

pub fn secure_cookie_name(cookie_name: &str) -> String {
    format!("{SECURE_COOKIE_PREFIX}{cookie_name}")
}
