//! Route table of the admin application.
//!
//! `/login` and `/register` are public; every other page sits behind
//! [`guard`](crate::guard::guard).

use crate::auth::AuthContext;
use crate::guard::{guard, GuardState, Guarded, Redirect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Home,
    Dashboard,
    Users,
    Roles,
    Tables,
    Zones,
    Products,
    Categories,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Login,
        Route::Register,
        Route::Home,
        Route::Dashboard,
        Route::Users,
        Route::Roles,
        Route::Tables,
        Route::Zones,
        Route::Products,
        Route::Categories,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Home => "/",
            Route::Dashboard => "/dashboard",
            Route::Users => "/usuarios",
            Route::Roles => "/usuarios/roles",
            Route::Tables => "/mesas",
            Route::Zones => "/mesas/zonas",
            Route::Products => "/productos",
            Route::Categories => "/productos/categorias",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Iniciar sesión",
            Route::Register => "Registro",
            Route::Home => "Inicio",
            Route::Dashboard => "Dashboard",
            Route::Users => "Usuarios",
            Route::Roles => "Roles",
            Route::Tables => "Mesas",
            Route::Zones => "Zonas",
            Route::Products => "Productos",
            Route::Categories => "Categorías",
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// Match a path, ignoring query string, fragment and trailing slashes.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }
}

/// Result of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Loading(Route),
    Redirect { from: Route, redirect: Redirect },
    NotFound(String),
}

/// Resolve a path against a guard state.
pub fn resolve(path: &str, state: GuardState) -> Navigation {
    let Some(route) = Route::from_path(path) else {
        return Navigation::NotFound(path.to_string());
    };
    if !route.is_protected() {
        return Navigation::Render(route);
    }
    match guard(state, || route) {
        Guarded::Loading => Navigation::Loading(route),
        Guarded::Authorized(route) => Navigation::Render(route),
        Guarded::Redirect(redirect) => Navigation::Redirect {
            from: route,
            redirect,
        },
    }
}

/// Resolve a path against the live session.
pub fn navigate(path: &str, ctx: &AuthContext) -> Navigation {
    resolve(path, ctx.guard_state())
}
