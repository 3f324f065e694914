/// Factory: build the process-wide `SessionVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::session::{JwtSessionVerifier, SessionVerifier};

pub fn build_session_verifier(config: &Config) -> Result<Arc<dyn SessionVerifier>, AppError> {
    let verifier = JwtSessionVerifier::new(&config.session).map_err(|e| {
        tracing::error!(error = %e, "failed to load session verification key");
        AppError::Internal
    })?;

    Ok(Arc::new(verifier))
}
