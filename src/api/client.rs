use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::{envelope, ApiError, FormFields};
use crate::config::ApiConfig;
use crate::session::SessionStore;

/// HTTP client for the sports backend.
///
/// Attaches the stored bearer token to every request and funnels every
/// response through one place, where an expired token clears the session
/// and successful bodies are unwrapped from their optional `data` envelope.
/// Each call is a single attempt.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl HttpClient {
    /// Create a new API client
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::decode(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path).json(body))
            .await?;
        Self::decode(response).await
    }

    /// POST a multipart form
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: FormFields,
    ) -> Result<T, ApiError> {
        let form = fields.into_form()?;
        let response = self
            .send(self.request(Method::POST, path).multipart(form))
            .await?;
        Self::decode(response).await
    }

    /// POST without a body, ignoring whatever comes back
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("No response from server, is the API running? {}", e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let error_text = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED => {
                tracing::warn!("Authentication rejected for {}: token invalid or expired", url);
                self.session.expire();
            }
            StatusCode::NOT_FOUND => tracing::debug!("Resource not found: {}", url),
            StatusCode::UNPROCESSABLE_ENTITY => {
                tracing::warn!("Validation error from {}: {}", url, error_text)
            }
            status if status.is_server_error() => {
                tracing::error!("Server error {} from {}", status, url)
            }
            status => tracing::warn!("Unexpected status {} from {}", status, url),
        }

        Err(ApiError::from_status(status, error_text))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.bytes().await?;
        envelope::decode(&body)
    }
}
