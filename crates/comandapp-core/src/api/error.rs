use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Carries the server's message when it sent one.
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("session token rejected"))]
    Unauthorized(Option<String>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request rejected: {0}")]
    BadRequest(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Cannot connect to the server: {0}")]
    Unreachable(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// The backend reports failures as `{"message": ...}` or `{"error": ...}`.
    pub fn server_message(body: &str) -> Option<String> {
        let value: Value = serde_json::from_str(body).ok()?;
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = Self::server_message(body).unwrap_or_else(|| Self::truncate_body(body));
        match status.as_u16() {
            401 => ApiError::Unauthorized(Self::server_message(body)),
            403 => ApiError::AccessDenied(detail),
            404 => ApiError::NotFound(detail),
            400 | 409 | 422 => ApiError::BadRequest(detail),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(detail),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, detail)),
        }
    }

    /// Connection failures and timeouts mean the server is out of reach.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ApiError::Unreachable(err.to_string())
        } else {
            ApiError::NetworkError(err)
        }
    }

    /// Message suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AccessDenied(m)
            | ApiError::NotFound(m)
            | ApiError::BadRequest(m)
            | ApiError::ServerError(m) => m.clone(),
            ApiError::Unreachable(_) | ApiError::NetworkError(_) => {
                "Cannot connect to the server".to_string()
            }
            other => other.to_string(),
        }
    }
}
