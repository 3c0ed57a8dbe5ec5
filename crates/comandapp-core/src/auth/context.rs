use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::api::AuthBackend;
use crate::guard::GuardState;

use super::actions::{AuthAction, AuthDispatcher, AuthError, LoginCredentials, RegisterUserData};
use super::session::{DecodedUser, SessionStore};

/// When the bootstrap flag of an [`AuthContext`] latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitPolicy {
    /// Latch after the first decode, whatever its outcome.
    #[default]
    FirstDecodeAttempt,
    /// Latch only once a token is present and decodes to a user.
    /// A token that never decodes keeps the context loading forever.
    FirstSuccessfulDecode,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub user: Option<DecodedUser>,
    pub is_authenticated: bool,
    pub is_initialized: bool,
}

impl AuthSnapshot {
    pub fn guard_state(&self) -> GuardState {
        GuardState {
            is_authenticated: self.is_authenticated,
            is_initialized: self.is_initialized,
        }
    }
}

/// Read/write surface of the auth subsystem for front ends.
pub struct AuthContext {
    session: Arc<SessionStore>,
    dispatcher: AuthDispatcher,
    policy: InitPolicy,
    initialized: AtomicBool,
}

impl AuthContext {
    /// Mount a context over an existing session.
    ///
    /// With no token there is nothing to wait for and the context starts
    /// initialized. With a token it stays loading until the user is resolved.
    pub fn mount(
        session: Arc<SessionStore>,
        backend: Arc<dyn AuthBackend>,
        policy: InitPolicy,
    ) -> Self {
        let initialized = !session.is_authenticated();
        debug!(initialized, ?policy, "Auth context mounted");
        Self {
            dispatcher: AuthDispatcher::new(session.clone(), backend),
            session,
            policy,
            initialized: AtomicBool::new(initialized),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn dispatcher(&self) -> &AuthDispatcher {
        &self.dispatcher
    }

    pub fn policy(&self) -> InitPolicy {
        self.policy
    }

    /// Decode the current user. The first call may latch the bootstrap flag.
    pub fn user(&self) -> Option<DecodedUser> {
        let user = self.session.current_user();
        self.observe(user.as_ref());
        user
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Whether the bootstrap decode has happened. A read that finds the flag
    /// unlatched performs the decode itself, so callers need not read the
    /// user first.
    pub fn is_initialized(&self) -> bool {
        if !self.initialized.load(Ordering::Acquire) {
            self.observe(self.session.current_user().as_ref());
        }
        self.initialized.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        let user = self.user();
        AuthSnapshot {
            user,
            is_authenticated: self.is_authenticated(),
            is_initialized: self.is_initialized(),
        }
    }

    pub fn guard_state(&self) -> GuardState {
        self.snapshot().guard_state()
    }

    pub async fn login(&self, credentials: LoginCredentials) -> bool {
        self.dispatcher.dispatch(AuthAction::Login(credentials)).await
    }

    pub async fn register(&self, data: RegisterUserData) -> bool {
        self.dispatcher.dispatch(AuthAction::Register(data)).await
    }

    pub fn logout(&self) -> bool {
        self.dispatcher.logout()
    }

    pub async fn try_login(&self, credentials: LoginCredentials) -> Result<(), AuthError> {
        self.dispatcher.try_dispatch(AuthAction::Login(credentials)).await
    }

    pub async fn try_register(&self, data: RegisterUserData) -> Result<(), AuthError> {
        self.dispatcher.try_dispatch(AuthAction::Register(data)).await
    }

    /// Token changes, one value per write.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.session.subscribe()
    }

    fn observe(&self, user: Option<&DecodedUser>) {
        if self.initialized.load(Ordering::Acquire) {
            return;
        }
        let latch = match self.policy {
            InitPolicy::FirstDecodeAttempt => true,
            InitPolicy::FirstSuccessfulDecode => user.is_some() && self.session.is_authenticated(),
        };
        if latch {
            self.initialized.store(true, Ordering::Release);
            debug!(user = ?user.map(|u| u.email.as_str()), "Auth context initialized");
        }
    }
}
