//! API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("Request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }

    /// Status code when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
