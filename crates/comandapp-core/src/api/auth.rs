//! Login and registration endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::auth::{LoginCredentials, RegisterUserData};

use super::{ApiClient, ApiError};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";

/// Success body of the auth endpoints. Only `token` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthResponse {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            message: None,
            extra: Map::new(),
        }
    }
}

/// Network side of the auth dispatcher.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError>;

    async fn register(&self, data: &RegisterUserData) -> Result<AuthResponse, ApiError>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        debug!(email = %credentials.email, "Sending login request");
        self.post_public(LOGIN_PATH, credentials).await
    }

    async fn register(&self, data: &RegisterUserData) -> Result<AuthResponse, ApiError> {
        debug!(email = %data.email, "Sending registration request");
        self.post_public(REGISTER_PATH, data).await
    }
}
