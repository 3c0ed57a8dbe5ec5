//! Route guard for protected views.
//!
//! The guard is a pure decision over two booleans from the auth context:
//! wait while the session is bootstrapping, render when authenticated,
//! otherwise redirect to the login entry point.

/// Login entry point that unauthenticated traffic is sent to.
pub const LOGIN_PATH: &str = "/login";

/// Inputs of the guard decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardState {
    pub is_authenticated: bool,
    pub is_initialized: bool,
}

/// Redirect instruction. `replace` means the guarded entry must not stay
/// in history, so back-navigation cannot return to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    pub replace: bool,
}

impl Redirect {
    pub fn to_login() -> Self {
        Self {
            to: LOGIN_PATH,
            replace: true,
        }
    }
}

/// Outcome of guarding a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V> {
    Loading,
    Authorized(V),
    Redirect(Redirect),
}

impl<V> Guarded<V> {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Guarded::Authorized(_))
    }

    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Guarded<U> {
        match self {
            Guarded::Loading => Guarded::Loading,
            Guarded::Authorized(view) => Guarded::Authorized(f(view)),
            Guarded::Redirect(redirect) => Guarded::Redirect(redirect),
        }
    }
}

/// Decide what a protected view renders as.
///
/// `view` is only built when access is granted.
pub fn guard<V>(state: GuardState, view: impl FnOnce() -> V) -> Guarded<V> {
    if !state.is_initialized {
        return Guarded::Loading;
    }
    if state.is_authenticated {
        Guarded::Authorized(view())
    } else {
        Guarded::Redirect(Redirect::to_login())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(is_initialized: bool, is_authenticated: bool) -> GuardState {
        GuardState {
            is_authenticated,
            is_initialized,
        }
    }

    #[test]
    fn test_loading_ignores_authentication() {
        assert_eq!(guard(state(false, false), || 1), Guarded::Loading);
        assert_eq!(guard(state(false, true), || 1), Guarded::Loading);
    }

    #[test]
    fn test_authorized_renders_view() {
        assert_eq!(guard(state(true, true), || "view"), Guarded::Authorized("view"));
    }

    #[test]
    fn test_unauthorized_redirects_with_replace() {
        assert_eq!(
            guard(state(true, false), || "view"),
            Guarded::Redirect(Redirect {
                to: "/login",
                replace: true
            })
        );
    }

    #[test]
    fn test_view_built_only_when_authorized() {
        let mut built = 0;
        let _ = guard(state(true, false), || built += 1);
        let _ = guard(state(false, true), || built += 1);
        assert_eq!(built, 0);

        let _ = guard(state(true, true), || built += 1);
        assert_eq!(built, 1);
    }

    #[test]
    fn test_map_preserves_decision() {
        assert_eq!(guard(state(true, true), || 2).map(|n| n * 10), Guarded::Authorized(20));
        assert!(!guard(state(true, false), || 2).map(|n| n * 10).is_authorized());
    }
}
