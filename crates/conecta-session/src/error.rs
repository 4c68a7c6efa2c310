//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No refresh token persisted")]
    NoRefreshToken,

    #[error("Refresh token rejected")]
    RefreshRejected,

    #[error("Could not fetch profile: {0}")]
    ProfileFetch(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Registration failed: {0}")]
    Registration(String),

    #[error("Storage error: {0}")]
    Storage(#[from] conecta_storage::StorageError),
}

impl SessionError {
    /// Errors the user can act on directly, as opposed to ones that end in a
    /// silent return to the login screen.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidCredentials
                | SessionError::Network(_)
                | SessionError::Registration(_)
        )
    }
}
