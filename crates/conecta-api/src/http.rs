//! reqwest implementation of the backend contract

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

use crate::backend::AuthBackend;
use crate::error::ApiError;
use crate::types::{
    CredentialsBody, ErrorBody, Profile, RefreshBody, RefreshedToken, Registration, TokenPair,
};
use crate::Result;

const TOKEN_PATH: &str = "api/token/";
const TOKEN_REFRESH_PATH: &str = "api/token/refresh/";
const PROFILE_PATH: &str = "profile/";
const REGISTER_PATH: &str = "register/";

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path relative to the API root.
    ///
    /// Absolute URLs pointing at another origin are refused, so a bearer
    /// token never leaves the configured backend.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))?;

        if url.origin() != self.base_url.origin() {
            return Err(ApiError::InvalidUrl(format!(
                "{path}: outside {}",
                self.base_url
            )));
        }

        Ok(url)
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn obtain_tokens(&self, username: &str, password: &str) -> Result<TokenPair> {
        let response = self
            .client
            .post(self.endpoint(TOKEN_PATH)?)
            .json(&CredentialsBody { username, password })
            .send()
            .await?;

        let pair = ensure_success(response).await?.json::<TokenPair>().await?;
        if pair.access.is_empty() || pair.refresh.is_empty() {
            return Err(ApiError::Decode("empty token in response".to_string()));
        }
        Ok(pair)
    }

    async fn refresh_access(&self, refresh_token: &str) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint(TOKEN_REFRESH_PATH)?)
            .json(&RefreshBody {
                refresh: refresh_token,
            })
            .send()
            .await?;

        let token = ensure_success(response)
            .await?
            .json::<RefreshedToken>()
            .await?;
        if token.access.is_empty() {
            return Err(ApiError::Decode("empty token in response".to_string()));
        }
        Ok(token.access)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<Profile> {
        let response = self
            .client
            .get(self.endpoint(PROFILE_PATH)?)
            .header(AUTHORIZATION, bearer(access_token))
            .send()
            .await?;

        Ok(ensure_success(response).await?.json::<Profile>().await?)
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(REGISTER_PATH)?)
            .json(registration)
            .send()
            .await?;

        ensure_success(response).await?;

        tracing::info!(username = %registration.username, "Registered new account");

        Ok(())
    }
}

pub fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

/// Map any non-success status to [`ApiError::Rejected`], keeping the
/// backend's `detail` message when it sent one.
pub async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail);

    tracing::debug!(
        status = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("unknown"),
        "Backend rejected request"
    );

    Err(ApiError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    // Url::join drops the last segment unless the base ends with a slash
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ApiError::InvalidUrl(format!(
            "{raw}: unsupported scheme {}",
            url.scheme()
        )));
    }

    Ok(url)
}
