use async_trait::async_trait;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::config::{SessionConfig, SessionKey};
use crate::services::session::secure_cookie_name;
use crate::services::session::verifier::{SessionClaims, SessionVerifier, VerifyError};

/// Verifies the signed session token stored in the session cookie.
///
/// - HS256 (shared secret) or EdDSA (Ed25519 public key), picked by `SessionKey`.
/// - `exp` is always checked; `iss`/`aud` only when configured.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtSessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_name: String,
    secure_cookie_name: String,
}

impl std::fmt::Debug for JwtSessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionVerifier")
            .field("validation", &self.validation)
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

impl JwtSessionVerifier {
    pub fn new(config: &SessionConfig) -> Result<Self, VerifyError> {
        let (decoding_key, algorithm) = match &config.key {
            SessionKey::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            SessionKey::Ed25519PublicPem(pem) => {
                (DecodingKey::from_ed_pem(pem.as_bytes())?, Algorithm::EdDSA)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = config.leeway_seconds;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
            cookie_name: config.cookie_name.clone(),
            secure_cookie_name: secure_cookie_name(&config.cookie_name),
        })
    }

    /// Raw token from the plain cookie, falling back to the `__Secure-` variant.
    pub fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        let jar = CookieJar::from_headers(headers);
        jar.get(&self.cookie_name)
            .or_else(|| jar.get(&self.secure_cookie_name))
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn decode(&self, token: &str) -> Result<SessionClaims, VerifyError> {
        let data =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.sub.trim().is_empty() {
            return Err(VerifyError::EmptyClaim("sub"));
        }

        Ok(data.claims)
    }
}

#[async_trait]
impl SessionVerifier for JwtSessionVerifier {
    async fn verify(&self, headers: &HeaderMap) -> Result<Option<SessionClaims>, VerifyError> {
        let Some(token) = self.session_token(headers) else {
            return Ok(None);
        };

        self.decode(&token).map(Some)
    }
}
