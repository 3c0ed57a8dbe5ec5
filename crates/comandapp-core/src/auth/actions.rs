use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiError, AuthBackend};

use super::session::SessionStore;

/// Credentials for `LOGIN`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload for `REGISTER`. Fields beyond email/password are passed through.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterUserData {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegisterUserData {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Debug for RegisterUserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserData")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("extra", &self.extra)
            .finish()
    }
}

/// An action accepted by [`AuthDispatcher`].
///
/// Wire form: `{"type": "LOGIN", "payload": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "UPPERCASE")]
pub enum AuthAction {
    Login(LoginCredentials),
    Register(RegisterUserData),
    Logout,
}

impl AuthAction {
    const TAGS: [&'static str; 3] = ["LOGIN", "REGISTER", "LOGOUT"];

    pub fn kind(&self) -> &'static str {
        match self {
            AuthAction::Login(_) => "LOGIN",
            AuthAction::Register(_) => "REGISTER",
            AuthAction::Logout => "LOGOUT",
        }
    }

    /// Parse a `{type, payload}` object.
    ///
    /// An unknown `type` is a caller bug and comes back as
    /// [`AuthError::UnsupportedAction`], never as a quiet `false`.
    pub fn from_json(raw: &str) -> Result<Self, AuthError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| AuthError::InvalidAction(e.to_string()))?;

        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| AuthError::InvalidAction("missing \"type\"".to_string()))?;
        if !Self::TAGS.contains(&tag) {
            return Err(AuthError::UnsupportedAction(tag.to_string()));
        }

        serde_json::from_value(value).map_err(|e| AuthError::InvalidAction(e.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The server's own wording when it gave one.
    #[error("{}", .0.as_deref().unwrap_or("Invalid email or password"))]
    InvalidCredentials(Option<String>),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Cannot reach the server: {0}")]
    NetworkUnavailable(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Unexpected response: {0}")]
    MalformedResponse(String),

    #[error("Failed to store session token: {0}")]
    Storage(String),

    #[error("Unsupported auth action: {0}")]
    UnsupportedAction(String),

    #[error("Invalid auth action: {0}")]
    InvalidAction(String),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized(message) => AuthError::InvalidCredentials(message),
            ApiError::AccessDenied(message) => AuthError::InvalidCredentials(Some(message)),
            ApiError::BadRequest(message) => AuthError::Rejected(message),
            ApiError::Unreachable(message) => AuthError::NetworkUnavailable(message),
            ApiError::NetworkError(e) => AuthError::NetworkUnavailable(e.to_string()),
            ApiError::InvalidResponse(message) => AuthError::MalformedResponse(message),
            other @ (ApiError::NotFound(_) | ApiError::RateLimited | ApiError::ServerError(_)) => {
                AuthError::ServerError(other.to_string())
            }
        }
    }
}

/// Single entry point for session-changing actions.
///
/// Concurrent logins are last-writer-wins: whichever response lands last
/// owns the stored token.
#[derive(Clone)]
pub struct AuthDispatcher {
    session: Arc<SessionStore>,
    backend: Arc<dyn AuthBackend>,
}

impl AuthDispatcher {
    pub fn new(session: Arc<SessionStore>, backend: Arc<dyn AuthBackend>) -> Self {
        Self { session, backend }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Run an action, reporting why it failed.
    pub async fn try_dispatch(&self, action: AuthAction) -> Result<(), AuthError> {
        match action {
            AuthAction::Login(credentials) => {
                let response = self.backend.login(&credentials).await?;
                self.store_token(&response.token)?;
                info!(email = %credentials.email, "Logged in");
                Ok(())
            }
            AuthAction::Register(data) => {
                let response = self.backend.register(&data).await?;
                self.store_token(&response.token)?;
                info!(email = %data.email, "Registered and logged in");
                Ok(())
            }
            AuthAction::Logout => {
                self.logout();
                Ok(())
            }
        }
    }

    /// Run an action, collapsing any failure into `false`.
    ///
    /// The cause is logged; use [`try_dispatch`](Self::try_dispatch) to branch on it.
    pub async fn dispatch(&self, action: AuthAction) -> bool {
        let kind = action.kind();
        match self.try_dispatch(action).await {
            Ok(()) => true,
            Err(e) => {
                warn!(action = kind, error = %e, "Auth action failed");
                false
            }
        }
    }

    /// Parse and run a `{type, payload}` action. Unknown tags are errors.
    pub async fn dispatch_json(&self, raw: &str) -> Result<bool, AuthError> {
        let action = AuthAction::from_json(raw)?;
        Ok(self.dispatch(action).await)
    }

    /// Clear the session. Synchronous, no network call.
    pub fn logout(&self) -> bool {
        // A refused clear is logged and masked in memory by the session store
        let _ = self.session.clear();
        info!("Logged out");
        true
    }

    fn store_token(&self, token: &str) -> Result<(), AuthError> {
        if token.is_empty() {
            return Err(AuthError::MalformedResponse(
                "empty token in auth response".to_string(),
            ));
        }
        self.session
            .set_token(token)
            .map_err(|e| AuthError::Storage(e.to_string()))
    }
}
