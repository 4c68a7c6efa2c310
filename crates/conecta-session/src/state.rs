//! Authentication State Machine
//!
//! ```text
//! Bootstrapping
//!   ↓ check_auth
//! Authenticated ⇄ Unauthenticated
//!   ↺ refresh         ↺ logout
//! ```

use serde::{Deserialize, Serialize};

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthState {
    /// Startup, before the persisted session has been checked
    Bootstrapping,
    /// Holding a validated access token
    Authenticated,
    /// No usable credentials
    Unauthenticated,
}

impl AuthState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: AuthState) -> bool {
        match (self, target) {
            // Bootstrap resolves exactly once, either way
            (AuthState::Bootstrapping, AuthState::Authenticated) => true,
            (AuthState::Bootstrapping, AuthState::Unauthenticated) => true,
            // Login
            (AuthState::Unauthenticated, AuthState::Authenticated) => true,
            // Logout or irrecoverable refresh failure
            (AuthState::Authenticated, AuthState::Unauthenticated) => true,
            // Refresh swaps the token in place; teardown is idempotent
            (AuthState::Authenticated, AuthState::Authenticated) => true,
            (AuthState::Unauthenticated, AuthState::Unauthenticated) => true,
            // Nothing goes back to bootstrapping
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AuthState::Bootstrapping)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthState::Bootstrapping => "bootstrapping",
            AuthState::Authenticated => "authenticated",
            AuthState::Unauthenticated => "unauthenticated",
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuthState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bootstrapping" => Ok(AuthState::Bootstrapping),
            "authenticated" => Ok(AuthState::Authenticated),
            "unauthenticated" => Ok(AuthState::Unauthenticated),
            _ => Err(format!("Unknown auth state: {}", s)),
        }
    }
}

/// Screen the UI should be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Loading indicator while bootstrapping
    Splash,
    /// Authenticated landing screen
    Home,
    /// Entry screen
    Login,
}

impl Route {
    /// Where a redirector should send the user for a given session.
    pub fn for_session(session: &Session) -> Route {
        match session.state {
            AuthState::Bootstrapping => Route::Splash,
            AuthState::Authenticated => Route::Home,
            AuthState::Unauthenticated => Route::Login,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Splash => "/splash",
            Route::Home => "/",
            Route::Login => "/auth/login",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
