//! What to do when the profile fetch fails right after a token refresh

use serde::{Deserialize, Serialize};

use conecta_api::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileFailurePolicy {
    /// Any profile failure ends the session.
    #[default]
    Teardown,
    /// A transport failure keeps the refreshed session and its previous
    /// preferences. A backend rejection still ends it.
    KeepOnTransient,
}

impl ProfileFailurePolicy {
    pub fn keeps_session(&self, err: &ApiError) -> bool {
        match self {
            ProfileFailurePolicy::Teardown => false,
            ProfileFailurePolicy::KeepOnTransient => matches!(err, ApiError::Network(_)),
        }
    }
}
