//! Session Manager
//!
//! Owns the authentication lifecycle: token issuance, refresh, bootstrap and
//! teardown. Operations are serialized; every observable change is a single
//! `Session` value replaced at once after persistence succeeded.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use conecta_api::{ApiError, AuthBackend, Registration};
use conecta_storage::{CredentialStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS};

use crate::error::SessionError;
use crate::policy::ProfileFailurePolicy;
use crate::session::{Preferences, Session};
use crate::state::{AuthState, Route};
use crate::Result;

pub struct SessionManager {
    /// Token and profile endpoints
    backend: Arc<dyn AuthBackend>,
    /// Persisted credentials, written only from here
    store: Arc<dyn CredentialStore>,
    /// Current session, observable by every screen
    session: Arc<watch::Sender<Session>>,
    /// Navigation signal
    route: Arc<watch::Sender<Route>>,
    /// One operation in flight at a time
    op_lock: Arc<Mutex<()>>,
    policy: ProfileFailurePolicy,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn AuthBackend>, store: Arc<dyn CredentialStore>) -> Self {
        let (session, _) = watch::channel(Session::bootstrapping());
        let (route, _) = watch::channel(Route::Splash);

        Self {
            backend,
            store,
            session: Arc::new(session),
            route: Arc::new(route),
            op_lock: Arc::new(Mutex::new(())),
            policy: ProfileFailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ProfileFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ProfileFailurePolicy {
        self.policy
    }

    // === Read side ===

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn state(&self) -> AuthState {
        self.session.borrow().state
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.session.borrow().is_loading()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.borrow().access_token.clone()
    }

    pub fn preferences(&self) -> Preferences {
        self.session.borrow().preferences.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    pub fn routes(&self) -> watch::Receiver<Route> {
        self.route.subscribe()
    }

    // === Operations ===

    /// Exchange credentials for a token pair and open a session.
    ///
    /// Nothing is persisted or committed unless both the token exchange and
    /// the profile fetch succeed.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let _guard = self.op_lock.lock().await;

        let tokens = self
            .backend
            .obtain_tokens(username, password)
            .await
            .map_err(|e| match e {
                ApiError::Rejected { .. } => SessionError::InvalidCredentials,
                other => SessionError::Network(other.to_string()),
            })?;

        let profile = self
            .backend
            .fetch_profile(&tokens.access)
            .await
            .map_err(|e| SessionError::ProfileFetch(e.to_string()))?;

        self.store.set_many(&[
            (ACCESS_TOKEN_KEY, tokens.access.as_str()),
            (REFRESH_TOKEN_KEY, tokens.refresh.as_str()),
        ])?;
        let session = Session::authenticated(tokens.access, Preferences::from(&profile));
        self.commit(session.clone());

        tracing::info!(
            username = %username,
            simplified_mode = session.preferences.simplified_mode,
            "Logged in"
        );

        Ok(session)
    }

    /// Swap the access token using the persisted refresh token.
    ///
    /// Returns `None` when there is nothing to refresh or the refresh failed;
    /// a failure ends the session and routes to the login screen.
    pub async fn refresh(&self) -> Option<String> {
        let _guard = self.op_lock.lock().await;
        self.refresh_locked().await
    }

    /// Refresh after the backend rejected `rejected_token`, unless another
    /// operation already replaced that token.
    pub async fn refresh_after_rejection(&self, rejected_token: &str) -> Option<String> {
        let _guard = self.op_lock.lock().await;

        if let Some(current) = self.access_token() {
            if current != rejected_token {
                tracing::debug!("Access token already refreshed");
                return Some(current);
            }
        }

        self.refresh_locked().await
    }

    /// Resolve the startup state from persisted credentials.
    ///
    /// Only resolves a manager that is still bootstrapping; once any
    /// operation has settled the state, later calls return it as is. Every
    /// failure ends in a full teardown.
    pub async fn check_auth(&self) -> Session {
        let _guard = self.op_lock.lock().await;

        if self.state() != AuthState::Bootstrapping {
            tracing::debug!("Session already resolved");
            return self.snapshot();
        }

        match self.bootstrap().await {
            Ok(session) => {
                self.commit(session);
                tracing::info!("Restored persisted session");
            }
            Err(SessionError::NoRefreshToken) => {
                tracing::info!("No persisted session");
                self.teardown_logged();
            }
            Err(err) => {
                tracing::warn!(error = %err, "Persisted session is not usable");
                self.teardown_logged();
            }
        }

        self.snapshot()
    }

    /// End the session. Safe to call repeatedly.
    ///
    /// In-memory state is reset even if the store cannot be cleared; the
    /// storage error is still returned.
    pub async fn logout(&self) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        self.teardown()?;

        tracing::info!("Logged out");

        Ok(())
    }

    /// Create an account. Does not sign in; a signed-out user is sent to the
    /// login screen.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        self.backend
            .register(registration)
            .await
            .map_err(|e| match e {
                ApiError::Rejected { detail, status } => SessionError::Registration(
                    detail.unwrap_or_else(|| format!("rejected with status {status}")),
                ),
                other => SessionError::Network(other.to_string()),
            })?;

        if self.state() == AuthState::Unauthenticated {
            self.navigate(Route::Login);
        }

        Ok(())
    }

    // === Internals (callers hold the operation lock) ===

    async fn refresh_locked(&self) -> Option<String> {
        let previous = self.snapshot();
        let fallback = previous
            .is_authenticated()
            .then_some(&previous.preferences);

        match self.renew(fallback).await {
            Ok(session) => {
                let token = session.access_token.clone();
                self.commit(session);
                tracing::debug!("Access token refreshed");
                token
            }
            Err(SessionError::NoRefreshToken) if !previous.is_authenticated() => {
                tracing::debug!("No refresh token persisted");
                None
            }
            Err(SessionError::Storage(err)) => {
                // Store still holds what memory holds
                tracing::error!(error = %err, "Failed to persist refreshed token, keeping session");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "Token refresh failed, ending session");
                self.teardown_logged();
                None
            }
        }
    }

    async fn bootstrap(&self) -> Result<Session> {
        let persisted = self
            .store
            .get(ACCESS_TOKEN_KEY)?
            .filter(|token| !token.is_empty());

        let Some(access) = persisted else {
            return self.renew(None).await;
        };

        match self.backend.fetch_profile(&access).await {
            Ok(profile) => Ok(Session::authenticated(access, Preferences::from(&profile))),
            Err(err) if err.is_rejected() => {
                tracing::debug!("Persisted access token rejected, refreshing");
                self.renew(None).await
            }
            Err(err) => Err(SessionError::ProfileFetch(err.to_string())),
        }
    }

    /// Exchange the persisted refresh token, validate the new access token
    /// and persist it. The caller commits the returned session.
    ///
    /// With a `fallback`, the configured policy may keep the session on a
    /// failed profile fetch, reusing those preferences.
    async fn renew(&self, fallback: Option<&Preferences>) -> Result<Session> {
        let refresh_token = self
            .store
            .get(REFRESH_TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .ok_or(SessionError::NoRefreshToken)?;

        let access = self
            .backend
            .refresh_access(&refresh_token)
            .await
            .map_err(|e| match e {
                ApiError::Rejected { .. } => SessionError::RefreshRejected,
                other => SessionError::Network(other.to_string()),
            })?;

        let preferences = match (self.backend.fetch_profile(&access).await, fallback) {
            (Ok(profile), _) => Preferences::from(&profile),
            (Err(err), Some(previous)) if self.policy.keeps_session(&err) => {
                tracing::warn!(error = %err, "Profile fetch failed after refresh, keeping session");
                previous.clone()
            }
            (Err(err), _) => return Err(SessionError::ProfileFetch(err.to_string())),
        };

        self.store.set(ACCESS_TOKEN_KEY, &access)?;

        Ok(Session::authenticated(access, preferences))
    }

    /// Clear the store first, then memory; the commit routes to login.
    fn teardown(&self) -> Result<()> {
        let cleared = self.store.remove_many(&SESSION_KEYS);

        self.commit(Session::unauthenticated());

        cleared.map_err(SessionError::from)
    }

    fn teardown_logged(&self) {
        if let Err(err) = self.teardown() {
            tracing::error!(error = %err, "Failed to clear persisted credentials");
        }
    }

    /// Publish `next`, then follow a state change with the matching route.
    fn commit(&self, next: Session) {
        let to = next.state;
        let route = Route::for_session(&next);
        let previous = self.session.send_replace(next);

        if !previous.state.can_transition_to(to) {
            tracing::warn!(from = %previous.state, to = %to, "Unexpected session transition");
        }
        tracing::debug!(from = %previous.state, to = %to, "Session transition");

        if previous.state != to {
            self.navigate(route);
        }
    }

    fn navigate(&self, route: Route) {
        self.route.send_replace(route);
        tracing::debug!(route = %route, "Navigate");
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            store: Arc::clone(&self.store),
            session: Arc::clone(&self.session),
            route: Arc::clone(&self.route),
            op_lock: Arc::clone(&self.op_lock),
            policy: self.policy,
        }
    }
}
