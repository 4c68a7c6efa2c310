//! Session data structure

use serde::{Deserialize, Serialize};

use conecta_api::Profile;

use crate::state::AuthState;

/// User preferences pulled from the backend profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Screens render a reduced layout when set
    pub simplified_mode: bool,
}

impl From<&Profile> for Preferences {
    fn from(profile: &Profile) -> Self {
        Self {
            simplified_mode: profile.simplified_mode,
        }
    }
}

/// Read-only view of the authentication state.
///
/// Consumers receive clones; only the session manager builds new values.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub state: AuthState,
    /// Bearer credential, present only while authenticated
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub preferences: Preferences,
}

impl Session {
    pub fn bootstrapping() -> Self {
        Self {
            state: AuthState::Bootstrapping,
            access_token: None,
            preferences: Preferences::default(),
        }
    }

    pub fn authenticated(access_token: String, preferences: Preferences) -> Self {
        debug_assert!(!access_token.is_empty());

        Self {
            state: AuthState::Authenticated,
            access_token: Some(access_token),
            preferences,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            state: AuthState::Unauthenticated,
            access_token: None,
            preferences: Preferences::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == AuthState::Bootstrapping
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

// Tokens never reach logs
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("preferences", &self.preferences)
            .finish()
    }
}
