//! Conecta Session Management
//!
//! - The session is the single source of truth for authentication state
//! - Tokens are persisted and restored on the next launch
//! - Access tokens are refreshed in place; an unrecoverable refresh logs out
//! - Every screen reads the session through a subscription, never writes it

mod error;
mod manager;
mod policy;
mod session;
mod state;

pub use error::SessionError;
pub use manager::SessionManager;
pub use policy::ProfileFailurePolicy;
pub use session::{Preferences, Session};
pub use state::{AuthState, Route};

pub type Result<T> = std::result::Result<T, SessionError>;
