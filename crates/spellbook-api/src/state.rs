//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use spellbook_auth::jwt::SigningSecret;
use spellbook_auth::session::SessionManager;
use spellbook_auth::store::{AccountStore, RefreshTokenStore};
use spellbook_core::config::AppConfig;
use spellbook_core::result::AppResult;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Access token signing key, threaded into `authenticate`
    pub secret: SigningSecret,
    /// Account and token lifecycle
    pub session_manager: Arc<SessionManager>,
}

impl AppState {
    /// Builds state from configuration and store collaborators.
    pub fn new(
        config: AppConfig,
        accounts: Arc<dyn AccountStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
    ) -> AppResult<Self> {
        let session_manager = SessionManager::new(&config.auth, accounts, refresh_tokens)?;
        Ok(Self {
            secret: session_manager.secret().clone(),
            config: Arc::new(config),
            session_manager: Arc::new(session_manager),
        })
    }
}
