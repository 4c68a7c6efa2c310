//! Backend contract consumed by the session manager

use async_trait::async_trait;

use crate::types::{Profile, Registration, TokenPair};
use crate::Result;

#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange a username and password for an access/refresh pair.
    async fn obtain_tokens(&self, username: &str, password: &str) -> Result<TokenPair>;

    /// Exchange a refresh token for a new access token.
    async fn refresh_access(&self, refresh_token: &str) -> Result<String>;

    /// Fetch the profile behind an access token. Doubles as token validation.
    async fn fetch_profile(&self, access_token: &str) -> Result<Profile>;

    async fn register(&self, registration: &Registration) -> Result<()>;
}
