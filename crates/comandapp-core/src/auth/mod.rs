//! Authentication module for managing the client-side session.
//!
//! This module provides:
//! - `TokenStore`: durable slot for the session token (file, keychain or memory)
//! - `SessionStore`: sole writer of the token, derives the decoded user
//! - `AuthDispatcher`: executes `LOGIN`, `REGISTER` and `LOGOUT` actions
//! - `AuthContext`: the facade front ends read from, with the bootstrap flag
//!
//! Authentication is defined by token presence. A token that fails to decode
//! still counts as authenticated, with no user attached.

pub mod actions;
pub mod context;
pub mod credentials;
pub mod session;
pub mod store;

pub use actions::{AuthAction, AuthDispatcher, AuthError, LoginCredentials, RegisterUserData};
pub use context::{AuthContext, AuthSnapshot, InitPolicy};
pub use credentials::KeyringTokenStore;
pub use session::{decode, DecodedUser, RoleRef, SessionStore};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
