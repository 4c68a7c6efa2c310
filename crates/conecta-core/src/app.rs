//! Main application state container

use std::sync::Arc;

use conecta_api::HttpBackend;
use conecta_session::{Session, SessionManager};
use conecta_storage::{CredentialStore, Database, SqliteCredentialStore};

use crate::client::AuthorizedClient;
use crate::config::Config;
use crate::Result;

/// Application instance
///
/// Wires the credential store, the backend and the session manager together.
/// Screens hold a clone of the session manager or the authorized client and
/// nothing else.
pub struct App {
    /// Configuration
    config: Config,
    /// Authentication lifecycle
    session: SessionManager,
    /// Bearer-authenticated requests for screens
    client: AuthorizedClient,
}

impl App {
    /// Open the credential database and build the application.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let db = Database::open(&config.database_path)?;
        Self::with_store(config, Arc::new(SqliteCredentialStore::new(db)))
    }

    /// Build the application over an existing credential store.
    pub fn with_store(config: Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let backend = HttpBackend::new(&config.api_base_url, config.request_timeout())?;

        let session = SessionManager::new(Arc::new(backend.clone()), store)
            .with_policy(config.profile_failure_policy);
        let client = AuthorizedClient::new(backend, session.clone());

        tracing::debug!(
            api_base_url = %config.api_base_url,
            policy = ?config.profile_failure_policy,
            "Application built"
        );

        Ok(Self {
            config,
            session,
            client,
        })
    }

    /// Resolve the persisted session. Call once at startup.
    pub async fn initialize(&self) -> Session {
        let session = self.session.check_auth().await;

        tracing::info!(state = %session.state, "Application initialized");

        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn client(&self) -> &AuthorizedClient {
        &self.client
    }
}
