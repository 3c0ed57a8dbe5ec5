//! REST client for the ComandAPP backend.
//!
//! `ApiClient` attaches the session token as a bearer header, turns non-2xx
//! responses into [`ApiError`] values and clears the session when the server
//! answers `401` to an authenticated request.
//!
//! Entity endpoints live in one file per dashboard page (tables, products,
//! users, roles); the auth endpoints implement [`AuthBackend`].

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod products;
pub mod roles;
pub mod tables;
pub mod users;

pub use auth::{AuthBackend, AuthResponse};
pub use client::{ApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use dashboard::DashboardSummary;
pub use error::ApiError;
