/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, セッション検証の鍵, gate の path 一覧など)
 * - 設定値のバリデーション (不足・矛盾があれば起動失敗)
 */
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::gate::RouteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("invalid configuration: {key}: {path:?} must start with '/'")]
    InvalidPath { key: &'static str, path: String },
    #[error("invalid configuration: GATE_AUTH_PATHS: {0:?} is not listed in GATE_PUBLIC_PATHS")]
    AuthPathNotPublic(String),
}

/// Key material used to check the session token signature.
#[derive(Clone)]
pub enum SessionKey {
    /// HS256 shared secret.
    Secret(String),
    /// Ed25519 public key, PEM encoded (EdDSA).
    Ed25519PublicPem(String),
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        match self {
            Self::Secret(_) => f.write_str("SessionKey::Secret(..)"),
            Self::Ed25519PublicPem(_) => f.write_str("SessionKey::Ed25519PublicPem(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub key: SessionKey,
    pub cookie_name: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub session: SessionConfig,
    pub routes: RouteConfig,
    pub static_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let session = session_from_vars(non_empty_var)?;
        let routes = routes_from_vars(non_empty_var)?;

        let static_dir = PathBuf::from(
            non_empty_var("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
        );

        let request_timeout = Duration::from_secs(
            env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        );

        Ok(Self {
            addr,
            app_env,
            session,
            routes,
            static_dir,
            request_timeout,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// `var` returns only non-empty values
fn session_from_vars(var: impl Fn(&str) -> Option<String>) -> Result<SessionConfig, ConfigError> {
    let key = match (var("SESSION_SECRET"), var("SESSION_PUBLIC_KEY_PEM")) {
        (Some(secret), None) => SessionKey::Secret(secret),
        // PEM from a single-line env value carries literal `\n`
        (None, Some(pem)) => SessionKey::Ed25519PublicPem(pem.replace("\\n", "\n")),
        (Some(_), Some(_)) => return Err(ConfigError::Invalid("SESSION_SECRET")),
        (None, None) => return Err(ConfigError::Missing("SESSION_SECRET")),
    };

    Ok(SessionConfig {
        key,
        cookie_name: var("SESSION_COOKIE_NAME").unwrap_or_else(|| "session-token".to_string()),
        issuer: var("SESSION_ISSUER"),
        audience: var("SESSION_AUDIENCE"),
        leeway_seconds: var("SESSION_LEEWAY_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(60),
    })
}

fn routes_from_vars(var: impl Fn(&str) -> Option<String>) -> Result<RouteConfig, ConfigError> {
    let mut routes = RouteConfig::default();
    if let Some(raw) = var("GATE_PUBLIC_PATHS") {
        routes.public_paths = split_list(&raw);
    }
    if let Some(raw) = var("GATE_AUTH_PATHS") {
        routes.auth_paths = split_list(&raw);
    }
    routes.validate()?;

    Ok(routes)
}

// Comma-separated list, blanks dropped
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
