//! Conecta API boundary
//!
//! The backend that issues tokens and serves profiles is external. This crate
//! holds the contract the session layer depends on ([`AuthBackend`]), the
//! wire types, and the reqwest-based implementation ([`HttpBackend`]).

mod backend;
mod error;
mod http;
mod types;

pub use backend::AuthBackend;
pub use error::ApiError;
pub use http::{bearer, ensure_success, HttpBackend};
pub use types::{Profile, Registration, TokenPair};

pub type Result<T> = std::result::Result<T, ApiError>;
