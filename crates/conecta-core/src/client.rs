//! Bearer-authenticated requests for screens
//!
//! Screens call the backend with the session's access token. A 401 triggers
//! one refresh and one retry; if that fails the session has already been torn
//! down and the caller gets [`CoreError::Unauthorized`].

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use conecta_api::{bearer, ensure_success, ApiError, HttpBackend};
use conecta_session::SessionManager;

use crate::error::CoreError;
use crate::Result;

#[derive(Clone)]
pub struct AuthorizedClient {
    backend: HttpBackend,
    session: SessionManager,
}

impl AuthorizedClient {
    pub fn new(backend: HttpBackend, session: SessionManager) -> Self {
        Self { backend, session }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(&body)).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, Some(&body)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let url = self.backend.endpoint(path)?;
        let token = self.session.access_token().ok_or(CoreError::Unauthorized)?;

        let mut response = self.request(method.clone(), url.clone(), &token, body).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!(path = %path, "Access token rejected, refreshing");

            let fresh = self
                .session
                .refresh_after_rejection(&token)
                .await
                .ok_or(CoreError::Unauthorized)?;
            response = self.request(method, url, &fresh, body).await?;
        }

        let response = ensure_success(response).await?;
        let payload = response.json::<T>().await.map_err(ApiError::from)?;

        Ok(payload)
    }

    async fn request(
        &self,
        method: Method,
        url: Url,
        token: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let mut request = self
            .backend
            .client()
            .request(method, url)
            .header(AUTHORIZATION, bearer(token));
        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| CoreError::Api(ApiError::from(e)))
    }
}
