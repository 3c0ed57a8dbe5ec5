//! HTTP client for the ComandAPP REST API.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, multipart::Form, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::config::Config;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Whether a request carries the session and reacts to `401`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Public,
    Authenticated,
}

/// API client for the ComandAPP backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self> {
        Self::with_timeout(base_url, session, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn from_config(config: &Config, session: Arc<SessionStore>) -> Result<Self> {
        Self::with_timeout(&config.api_url, session, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.session.token() {
            match header::HeaderValue::from_str(&format!("Bearer {}", clean_token(&token))) {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored token is not a valid header value, sending request without it"),
            }
        }
        headers
    }

    /// Send a request, retrying on 429 when the body can be replayed.
    async fn execute(&self, request: RequestBuilder, scope: Scope) -> Result<Response, ApiError> {
        let mut pending = match scope {
            Scope::Authenticated => request.headers(self.auth_headers()),
            Scope::Public => request,
        };
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let replay = pending.try_clone();
            let response = pending.send().await.map_err(ApiError::from_reqwest)?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                match replay {
                    Some(next) if retries < MAX_RATE_LIMIT_RETRIES => {
                        retries += 1;
                        warn!(url = %response.url(), retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                        backoff_ms *= 2; // Exponential backoff
                        pending = next;
                        continue;
                    }
                    _ => return Err(ApiError::RateLimited),
                }
            }

            if status == StatusCode::UNAUTHORIZED && scope == Scope::Authenticated {
                warn!(url = %response.url(), "Session rejected by server, clearing token");
                // A refused clear is masked in memory by the session store
                let _ = self.session.clear();
            }

            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Request failed");
            return Err(ApiError::from_status(status, &body));
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let url = response.url().clone();
        let text = response.text().await.map_err(ApiError::from_reqwest)?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", url.path(), e)))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.get(self.url(path));
        Self::parse(self.execute(request, Scope::Authenticated).await?).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.client.post(self.url(path)).json(body);
        Self::parse(self.execute(request, Scope::Authenticated).await?).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.client.put(self.url(path)).json(body);
        Self::parse(self.execute(request, Scope::Authenticated).await?).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.delete(self.url(path));
        Self::parse(self.execute(request, Scope::Authenticated).await?).await
    }

    /// Multipart bodies cannot be replayed, so a 429 is not retried here.
    pub(crate) async fn send_form<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.client.request(method, self.url(path)).multipart(form);
        Self::parse(self.execute(request, Scope::Authenticated).await?).await
    }

    /// POST without the session. Used by the auth endpoints, where a `401`
    /// means bad credentials and must not touch the stored token.
    pub(crate) async fn post_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.client.post(self.url(path)).json(body);
        Self::parse(self.execute(request, Scope::Public).await?).await
    }
}

/// Strip one pair of surrounding double quotes left by JSON-encoded storage.
fn clean_token(token: &str) -> &str {
    let token = token.strip_prefix('"').unwrap_or(token);
    token.strip_suffix('"').unwrap_or(token)
}
