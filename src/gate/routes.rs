//! Path classification for the gate.
//!
//! Matching is plain `starts_with` on the configured prefixes, so `/loginhelp`
//! falls under `/login`. Segment-aware matching would change which pages are
//! reachable without a session, so the prefix rule is kept as-is.

use std::fmt;

use crate::config::ConfigError;

/// Which gate policy applies to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Reachable without a session.
    Public,
    /// Public, but a signed-in user is sent to the dashboard instead.
    AuthOnly,
    /// Requires a session.
    Protected,
}

impl fmt::Display for PathClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::AuthOnly => "auth_only",
            Self::Protected => "protected",
        })
    }
}

/// Immutable route policy, built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub public_paths: Vec<String>,
    /// Must be a subset of `public_paths`.
    pub auth_paths: Vec<String>,
    pub login_path: String,
    pub dashboard_path: String,
    pub onboarding_path: String,
    pub api_prefix: String,
    /// Never handed to the gate (static assets, framework internals).
    pub excluded_prefixes: Vec<String>,
    pub excluded_extensions: Vec<String>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            public_paths: strings(&["/login", "/register", "/api/auth", "/api/webhooks"]),
            auth_paths: strings(&["/login", "/register"]),
            login_path: "/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
            onboarding_path: "/onboarding".to_string(),
            api_prefix: "/api".to_string(),
            excluded_prefixes: strings(&["/static", "/favicon.ico"]),
            excluded_extensions: strings(&["svg", "png", "jpg", "jpeg", "gif", "webp"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn matches_any(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| path.starts_with(p.as_str()))
}

impl RouteConfig {
    /// Total: every path lands in exactly one class.
    pub fn classify(&self, path: &str) -> PathClass {
        if !matches_any(path, &self.public_paths) {
            PathClass::Protected
        } else if matches_any(path, &self.auth_paths) {
            PathClass::AuthOnly
        } else {
            PathClass::Public
        }
    }

    /// True when the path bypasses the gate entirely.
    pub fn is_excluded(&self, path: &str) -> bool {
        if matches_any(path, &self.excluded_prefixes) {
            return true;
        }

        let last = path.rsplit('/').next().unwrap_or(path);
        match last.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                self.excluded_extensions.iter().any(|e| e == ext)
            }
            _ => false,
        }
    }

    pub fn is_onboarding(&self, path: &str) -> bool {
        path.starts_with(self.onboarding_path.as_str())
    }

    pub fn is_api(&self, path: &str) -> bool {
        path.starts_with(self.api_prefix.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fixed = [
            &self.login_path,
            &self.dashboard_path,
            &self.onboarding_path,
            &self.api_prefix,
        ];
        let lists: [(&'static str, Vec<&String>); 4] = [
            ("GATE_PUBLIC_PATHS", self.public_paths.iter().collect()),
            ("GATE_AUTH_PATHS", self.auth_paths.iter().collect()),
            ("excluded_prefixes", self.excluded_prefixes.iter().collect()),
            ("route paths", fixed.into_iter().collect()),
        ];

        for (key, paths) in lists {
            if let Some(bad) = paths.into_iter().find(|p| !p.starts_with('/')) {
                return Err(ConfigError::InvalidPath {
                    key,
                    path: bad.clone(),
                });
            }
        }

        if let Some(bad) = self
            .auth_paths
            .iter()
            .find(|a| !self.public_paths.contains(a))
        {
            return Err(ConfigError::AuthPathNotPublic(bad.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_classify_as_expected() {
        let routes = RouteConfig::default();

        assert_eq!(routes.classify("/login"), PathClass::AuthOnly);
        assert_eq!(routes.classify("/register"), PathClass::AuthOnly);
        assert_eq!(routes.classify("/api/auth/session"), PathClass::Public);
        assert_eq!(routes.classify("/api/webhooks/billing"), PathClass::Public);
        assert_eq!(routes.classify("/dashboard"), PathClass::Protected);
        assert_eq!(routes.classify("/onboarding"), PathClass::Protected);
        assert_eq!(routes.classify("/api/users"), PathClass::Protected);
        assert_eq!(routes.classify("/"), PathClass::Protected);
    }

    #[test]
    fn prefix_match_is_not_segment_aware() {
        let routes = RouteConfig::default();
        assert_eq!(routes.classify("/loginhelp"), PathClass::AuthOnly);
        assert_eq!(routes.classify("/api/authors"), PathClass::Public);
    }

    #[test]
    fn excluded_paths_cover_static_dir_and_image_extensions() {
        let routes = RouteConfig::default();

        assert!(routes.is_excluded("/static/app.css"));
        assert!(routes.is_excluded("/favicon.ico"));
        assert!(routes.is_excluded("/logo.png"));
        assert!(routes.is_excluded("/img/team/photo.webp"));

        assert!(!routes.is_excluded("/dashboard"));
        assert!(!routes.is_excluded("/logo.PNG"));
        assert!(!routes.is_excluded("/.png"));
        assert!(!routes.is_excluded("/png.d/report"));
    }

    #[test]
    fn onboarding_and_api_checks_use_prefixes() {
        let routes = RouteConfig::default();
        assert!(routes.is_onboarding("/onboarding/step-2"));
        assert!(routes.is_api("/api/users"));
        assert!(!routes.is_api("/dashboard/api"));
    }

    #[test]
    fn validate_rejects_auth_paths_outside_public_paths() {
        let mut routes = RouteConfig::default();
        assert_eq!(routes.validate(), Ok(()));

        routes.auth_paths.push("/forgot-password".into());
        assert_eq!(
            routes.validate(),
            Err(ConfigError::AuthPathNotPublic("/forgot-password".into()))
        );
    }

    #[test]
    fn validate_names_the_list_holding_a_relative_path() {
        let mut routes = RouteConfig::default();
        routes.public_paths.push("login".into());
        assert_eq!(
            routes.validate(),
            Err(ConfigError::InvalidPath {
                key: "GATE_PUBLIC_PATHS",
                path: "login".into(),
            })
        );

        let mut routes = RouteConfig::default();
        routes.auth_paths.push("signup".into());
        let err = routes.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPath {
                key: "GATE_AUTH_PATHS",
                path: "signup".into(),
            }
        );
        assert!(err.to_string().contains("GATE_AUTH_PATHS"));
        assert!(err.to_string().contains("signup"));
    }
}
