//! Session gate evaluated once per request.
//!
//! Order of checks (first match wins):
//! - public path: pass, except auth pages (`/login`, `/register`) which send a
//!   signed-in user to the dashboard
//! - protected path without session: login, with `callbackUrl`
//! - onboarding unfinished: onboarding, unless already there or under `/api`
//! - onboarding finished but visiting onboarding: dashboard
//! - otherwise pass

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::gate::decision::Decision;
use crate::gate::routes::{PathClass, RouteConfig};
use crate::services::session::{SessionClaims, SessionVerifier};

/// Decision plus what the gate saw while making it.
#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub class: PathClass,
    pub decision: Decision,
    /// `None` for plain public paths: the verifier is not consulted there.
    pub session: Option<SessionClaims>,
}

#[derive(Clone)]
pub struct Gatekeeper {
    routes: Arc<RouteConfig>,
    verifier: Arc<dyn SessionVerifier>,
}

impl std::fmt::Debug for Gatekeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gatekeeper")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl Gatekeeper {
    pub fn new(routes: Arc<RouteConfig>, verifier: Arc<dyn SessionVerifier>) -> Self {
        Self { routes, verifier }
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    pub async fn handle(&self, path: &str, headers: &HeaderMap) -> Decision {
        self.evaluate(path, headers).await.decision
    }

    pub async fn evaluate(&self, path: &str, headers: &HeaderMap) -> GateOutcome {
        let class = self.routes.classify(path);

        let session = match class {
            PathClass::Public => None,
            PathClass::AuthOnly | PathClass::Protected => self.session(headers).await,
        };

        let decision = self.decide(path, class, session.as_ref());

        tracing::debug!(
            path,
            %class,
            authenticated = session.is_some(),
            decision = ?decision,
            "gate decision"
        );

        GateOutcome {
            class,
            decision,
            session,
        }
    }

    /// Verifier result with failures folded into "no session" (fail-closed).
    pub async fn session(&self, headers: &HeaderMap) -> Option<SessionClaims> {
        match self.verifier.verify(headers).await {
            Ok(claims) => claims,
            Err(err) => {
                tracing::warn!(error = %err, "session verification failed");
                None
            }
        }
    }

    /// Pure part of the gate: same inputs, same decision.
    pub fn decide(&self, path: &str, class: PathClass, claims: Option<&SessionClaims>) -> Decision {
        let routes = &self.routes;

        match (class, claims) {
            (PathClass::Public, _) | (PathClass::AuthOnly, None) => Decision::Continue,
            (PathClass::AuthOnly, Some(_)) => Decision::RedirectTo(routes.dashboard_path.clone()),
            (PathClass::Protected, None) => Decision::login(&routes.login_path, path),
            (PathClass::Protected, Some(claims)) => {
                let on_onboarding = routes.is_onboarding(path);

                if !claims.onboarding_complete && !on_onboarding && !routes.is_api(path) {
                    Decision::RedirectTo(routes.onboarding_path.clone())
                } else if claims.onboarding_complete && on_onboarding {
                    Decision::RedirectTo(routes.dashboard_path.clone())
                } else {
                    Decision::Continue
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::services::session::VerifyError;

    enum Reply {
        Session(SessionClaims),
        Anonymous,
        Down,
    }

    struct StubVerifier {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubVerifier {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SessionVerifier for StubVerifier {
        async fn verify(
            &self,
            _headers: &HeaderMap,
        ) -> Result<Option<SessionClaims>, VerifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Session(claims) => Ok(Some(claims.clone())),
                Reply::Anonymous => Ok(None),
                Reply::Down => Err(VerifyError::Unavailable("connection refused".into())),
            }
        }
    }

    fn claims(onboarding_complete: bool) -> SessionClaims {
        SessionClaims {
            sub: "user-1".into(),
            email: Some("ana@example.com".into()),
            name: None,
            onboarding_complete,
            exp: 4_102_444_800,
        }
    }

    fn gate(stub: &Arc<StubVerifier>) -> Gatekeeper {
        Gatekeeper::new(Arc::new(RouteConfig::default()), stub.clone())
    }

    fn redirect(to: &str) -> Decision {
        Decision::RedirectTo(to.into())
    }

    #[tokio::test]
    async fn protected_paths_without_session_go_to_login() {
        let stub = StubVerifier::new(Reply::Anonymous);
        let gate = gate(&stub);

        for path in ["/dashboard", "/", "/settings/profile", "/api/users", "/onboarding"] {
            let expected = Decision::login("/login", path);
            assert_eq!(gate.handle(path, &HeaderMap::new()).await, expected, "{path}");
        }
        assert_eq!(
            gate.handle("/dashboard", &HeaderMap::new()).await,
            redirect("/login?callbackUrl=%2Fdashboard")
        );
    }

    #[tokio::test]
    async fn auth_pages_send_signed_in_users_to_dashboard() {
        let stub = StubVerifier::new(Reply::Session(claims(true)));
        let gate = gate(&stub);

        assert_eq!(gate.handle("/login", &HeaderMap::new()).await, redirect("/dashboard"));
        assert_eq!(gate.handle("/register", &HeaderMap::new()).await, redirect("/dashboard"));
        // prefix quirk
        assert_eq!(gate.handle("/loginhelp", &HeaderMap::new()).await, redirect("/dashboard"));
    }

    #[tokio::test]
    async fn auth_pages_pass_for_anonymous_users() {
        let stub = StubVerifier::new(Reply::Anonymous);
        let gate = gate(&stub);

        assert_eq!(gate.handle("/login", &HeaderMap::new()).await, Decision::Continue);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn plain_public_paths_never_consult_the_verifier() {
        let stub = StubVerifier::new(Reply::Session(claims(false)));
        let gate = gate(&stub);

        for path in ["/api/auth/session", "/api/webhooks/billing"] {
            let outcome = gate.evaluate(path, &HeaderMap::new()).await;
            assert_eq!(outcome.class, PathClass::Public);
            assert_eq!(outcome.decision, Decision::Continue);
            assert!(outcome.session.is_none());
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn unfinished_onboarding_is_forced_to_onboarding() {
        let stub = StubVerifier::new(Reply::Session(claims(false)));
        let gate = gate(&stub);

        assert_eq!(gate.handle("/dashboard", &HeaderMap::new()).await, redirect("/onboarding"));
        assert_eq!(gate.handle("/onboarding", &HeaderMap::new()).await, Decision::Continue);
        assert_eq!(
            gate.handle("/onboarding/profile", &HeaderMap::new()).await,
            Decision::Continue
        );
    }

    #[tokio::test]
    async fn finished_onboarding_leaves_onboarding_for_dashboard() {
        let stub = StubVerifier::new(Reply::Session(claims(true)));
        let gate = gate(&stub);

        assert_eq!(gate.handle("/onboarding", &HeaderMap::new()).await, redirect("/dashboard"));
        assert_eq!(gate.handle("/dashboard", &HeaderMap::new()).await, Decision::Continue);
    }

    #[tokio::test]
    async fn api_paths_are_never_sent_to_onboarding() {
        for reply in [
            Reply::Session(claims(false)),
            Reply::Session(claims(true)),
            Reply::Anonymous,
            Reply::Down,
        ] {
            let stub = StubVerifier::new(reply);
            let decision = gate(&stub).handle("/api/users", &HeaderMap::new()).await;
            assert_ne!(decision, redirect("/onboarding"));
        }

        let stub = StubVerifier::new(Reply::Session(claims(false)));
        assert_eq!(
            gate(&stub).handle("/api/users", &HeaderMap::new()).await,
            Decision::Continue
        );
    }

    #[tokio::test]
    async fn verifier_failure_is_treated_as_signed_out() {
        let stub = StubVerifier::new(Reply::Down);
        let gate = gate(&stub);

        assert_eq!(
            gate.handle("/dashboard", &HeaderMap::new()).await,
            redirect("/login?callbackUrl=%2Fdashboard")
        );
        assert_eq!(gate.handle("/login", &HeaderMap::new()).await, Decision::Continue);
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn continue_outcome_carries_the_session() {
        let stub = StubVerifier::new(Reply::Session(claims(true)));
        let outcome = gate(&stub).evaluate("/dashboard", &HeaderMap::new()).await;

        assert!(outcome.decision.is_continue());
        assert_eq!(outcome.session, Some(claims(true)));
    }

    #[test]
    fn decide_is_idempotent() {
        let stub = StubVerifier::new(Reply::Anonymous);
        let gate = gate(&stub);
        let routes = RouteConfig::default();
        let sessions = [None, Some(claims(false)), Some(claims(true))];

        for path in ["/login", "/api/auth/x", "/dashboard", "/onboarding", "/api/users"] {
            let class = routes.classify(path);
            for session in &sessions {
                let first = gate.decide(path, class, session.as_ref());
                let second = gate.decide(path, class, session.as_ref());
                assert_eq!(first, second, "{path}");
            }
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn custom_route_config_is_honoured() {
        let routes = RouteConfig {
            login_path: "/signin".into(),
            public_paths: vec!["/signin".into()],
            auth_paths: vec!["/signin".into()],
            ..RouteConfig::default()
        };
        let stub = StubVerifier::new(Reply::Anonymous);
        let gate = Gatekeeper::new(Arc::new(routes), stub.clone());

        assert_eq!(
            gate.handle("/register", &HeaderMap::new()).await,
            redirect("/signin?callbackUrl=%2Fregister")
        );
    }
}
