//! Conecta Storage Layer
//!
//! SQLite-based persistence for the session credentials.
//! Multi-key writes are transactional: either every key lands or none does.

mod credentials;
mod database;
mod error;
mod migrations;

pub use credentials::{
    CredentialStore, MemoryCredentialStore, SqliteCredentialStore, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY, SESSION_KEYS,
};
pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
