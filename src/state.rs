/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - gatekeeper (RouteConfig + SessionVerifier), セッション cookie 名
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::gate::{Gatekeeper, RouteConfig};
use crate::services::session::{SessionVerifier, secure_cookie_name};

#[derive(Clone, Debug)]
pub struct AppState {
    pub gatekeeper: Gatekeeper,
    session_cookie: Arc<str>,
}

impl AppState {
    pub fn new(
        routes: RouteConfig,
        verifier: Arc<dyn SessionVerifier>,
        session_cookie: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            gatekeeper: Gatekeeper::new(Arc::new(routes), verifier),
            session_cookie: session_cookie.into(),
        }
    }

    pub fn routes(&self) -> &RouteConfig {
        self.gatekeeper.routes()
    }

    /// Plain and `__Secure-` names, in that order.
    pub fn session_cookie_names(&self) -> [String; 2] {
        [
            self.session_cookie.to_string(),
            secure_cookie_name(&self.session_cookie),
        ]
    }
}
