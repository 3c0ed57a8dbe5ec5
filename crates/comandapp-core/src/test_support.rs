//! Fixtures shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use crate::api::{ApiError, AuthBackend, AuthResponse};
use crate::auth::{LoginCredentials, RegisterUserData, TokenStore};

pub fn sign(claims: &Value) -> String {
    encode(&Header::default(), claims, &EncodingKey::from_secret(b"test-secret"))
        .expect("test claims should encode")
}

pub fn admin_claims() -> Value {
    json!({
        "id": "1",
        "email": "a@b.com",
        "name": "A",
        "role": {"id": "1", "name": "ADMIN"},
        "iat": 1_700_000_000
    })
}

pub fn admin_token() -> String {
    sign(&admin_claims())
}

/// Serve `router` on an ephemeral port, returning the `/api` base URL.
pub async fn spawn_backend(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server failed");
    });
    format!("http://{}/api", addr)
}

#[derive(Debug, Clone)]
enum Outcome {
    Token(String),
    Fail(FailWith),
}

#[derive(Debug, Clone)]
enum FailWith {
    Unauthorized(Option<String>),
    AccessDenied(String),
    BadRequest(String),
    NotFound(String),
    RateLimited,
    ServerError(String),
    Unreachable(String),
    InvalidResponse(String),
}

impl FailWith {
    fn from_error(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized(m) => FailWith::Unauthorized(m),
            ApiError::AccessDenied(m) => FailWith::AccessDenied(m),
            ApiError::BadRequest(m) => FailWith::BadRequest(m),
            ApiError::NotFound(m) => FailWith::NotFound(m),
            ApiError::RateLimited => FailWith::RateLimited,
            ApiError::ServerError(m) => FailWith::ServerError(m),
            ApiError::Unreachable(m) => FailWith::Unreachable(m),
            ApiError::NetworkError(e) => FailWith::Unreachable(e.to_string()),
            ApiError::InvalidResponse(m) => FailWith::InvalidResponse(m),
        }
    }

    fn to_error(&self) -> ApiError {
        match self.clone() {
            FailWith::Unauthorized(m) => ApiError::Unauthorized(m),
            FailWith::AccessDenied(m) => ApiError::AccessDenied(m),
            FailWith::BadRequest(m) => ApiError::BadRequest(m),
            FailWith::NotFound(m) => ApiError::NotFound(m),
            FailWith::RateLimited => ApiError::RateLimited,
            FailWith::ServerError(m) => ApiError::ServerError(m),
            FailWith::Unreachable(m) => ApiError::Unreachable(m),
            FailWith::InvalidResponse(m) => ApiError::InvalidResponse(m),
        }
    }
}

/// In-memory auth backend that counts calls.
#[derive(Debug, Clone)]
pub struct FakeAuthBackend {
    outcome: Outcome,
    login_calls: Arc<AtomicUsize>,
    register_calls: Arc<AtomicUsize>,
}

impl FakeAuthBackend {
    pub fn issuing(token: &str) -> Self {
        Self::with_outcome(Outcome::Token(token.to_string()))
    }

    pub fn failing(err: ApiError) -> Self {
        Self::with_outcome(Outcome::Fail(FailWith::from_error(err)))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            login_calls: Arc::new(AtomicUsize::new(0)),
            register_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> Result<AuthResponse, ApiError> {
        match &self.outcome {
            Outcome::Token(token) => Ok(AuthResponse::new(token.clone())),
            Outcome::Fail(fail) => Err(fail.to_error()),
        }
    }
}

#[async_trait]
impl AuthBackend for FakeAuthBackend {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.respond()
    }

    async fn register(&self, _data: &RegisterUserData) -> Result<AuthResponse, ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.respond()
    }
}

/// Token store whose writes can be switched to fail, like a read-only data
/// directory or a locked keychain. Clones share state.
#[derive(Debug, Clone)]
pub struct FailingTokenStore {
    token: Arc<Mutex<Option<String>>>,
    failing: Arc<AtomicBool>,
}

impl FailingTokenStore {
    pub fn empty() -> Self {
        Self {
            token: Arc::new(Mutex::new(None)),
            failing: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::empty();
        *store.token.lock().unwrap() = Some(token.to_string());
        store
    }

    /// Second handle on the same slot, kept by a test after the store is moved.
    pub fn handle(&self) -> Self {
        self.clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// What the durable slot holds, bypassing any session masking.
    pub fn stored(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

impl TokenStore for FailingTokenStore {
    fn get(&self) -> Option<String> {
        self.stored()
    }

    fn set(&self, token: Option<&str>) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("token storage is read-only");
        }
        *self.token.lock().unwrap() = token.map(str::to_string);
        Ok(())
    }
}
