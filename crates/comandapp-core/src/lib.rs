//! Core library for ComandAPP, the restaurant administration client.
//!
//! The interesting part of this crate is the session layer:
//!
//! - [`auth::TokenStore`]: durable slot holding the session token
//! - [`auth::SessionStore`]: owner of the token, derives the decoded user
//! - [`auth::AuthDispatcher`]: turns `LOGIN`/`REGISTER`/`LOGOUT` actions into store writes
//! - [`auth::AuthContext`]: the read/write surface used by front ends
//! - [`guard`]: decides whether a protected view renders, waits, or redirects
//!
//! Everything else is a typed REST client for the dashboard entities
//! (zones, tables, products, categories, users and roles).

pub mod api;
pub mod auth;
pub mod config;
pub mod guard;
pub mod models;
pub mod routes;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthAction, AuthContext, AuthDispatcher, AuthError, DecodedUser, SessionStore};
pub use config::Config;
pub use guard::{guard, GuardState, Guarded, Redirect};
pub use routes::{navigate, Navigation, Route};

#[cfg(test)]
mod test_support;
