//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] conecta_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] conecta_session::SessionError),

    #[error("API error: {0}")]
    Api(#[from] conecta_api::ApiError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not signed in")]
    Unauthorized,
}
