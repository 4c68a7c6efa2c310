//! Conecta Core
//!
//! Central coordination layer for the citizen-services client.
//! The session owns authentication; screens go through [`AuthorizedClient`].

mod app;
mod client;
mod config;
mod error;

pub use app::App;
pub use client::AuthorizedClient;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use conecta_api::{ApiError, AuthBackend, HttpBackend, Profile, Registration, TokenPair};
pub use conecta_session::{
    AuthState, Preferences, ProfileFailurePolicy, Route, Session, SessionError, SessionManager,
};
pub use conecta_storage::{
    CredentialStore, Database, MemoryCredentialStore, SqliteCredentialStore, StorageError,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
