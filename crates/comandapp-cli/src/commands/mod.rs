//! Command handlers.
//!
//! Every handler for a protected page first resolves that page's route
//! through [`comandapp_core::routes::navigate`]; only `Render` lets the
//! command touch the API.

mod menu;
mod session;
mod staff;
mod tables;

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::debug;

use comandapp_core::api::AuthBackend;
use comandapp_core::auth::{AuthContext, InitPolicy, SessionStore};
use comandapp_core::routes::{navigate, Navigation, Route};
use comandapp_core::{ApiClient, Config};

use crate::cli::{Cli, Command};
use crate::output::Output;

/// Everything a command needs: config, the session, the API client and
/// the auth facade mounted over them.
pub struct App {
    pub config: Config,
    pub api: ApiClient,
    pub auth: AuthContext,
    pub out: Output,
}

impl App {
    pub fn new(config: Config, session: Arc<SessionStore>, out: Output) -> Result<Self> {
        let api = ApiClient::from_config(&config, session.clone())?;
        let backend: Arc<dyn AuthBackend> = Arc::new(api.clone());
        let auth = AuthContext::mount(session, backend, InitPolicy::default());
        Ok(Self {
            config,
            api,
            auth,
            out,
        })
    }

    /// Run the route guard for `route`'s page.
    pub fn require(&self, route: Route) -> Result<()> {
        match navigate(route.path(), &self.auth) {
            Navigation::Render(_) => Ok(()),
            Navigation::Redirect { from, redirect } => {
                debug!(from = from.path(), to = redirect.to, "Guard redirected");
                bail!(
                    "{} requires a signed-in user. Run `comandapp login` first (redirected to {})",
                    from.title(),
                    redirect.to
                )
            }
            Navigation::Loading(from) => bail!(
                "{} is still waiting for the session to load. The stored token could not be decoded; run `comandapp logout` and sign in again",
                from.title()
            ),
            Navigation::NotFound(path) => bail!("No page at {}", path),
        }
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let session = Arc::new(config.open_session()?);
    let app = App::new(config, session, Output { json: cli.json })?;

    match cli.command {
        Command::Login { email, password } => session::login(app, email, password).await,
        Command::Register {
            email,
            name,
            role_id,
            password,
        } => session::register(&app, email, name, role_id, password).await,
        Command::Logout => session::logout(&app),
        Command::Whoami => session::whoami(&app),
        Command::Route { path } => session::route(&app, &path),
        Command::Dashboard => {
            app.require(Route::Dashboard)?;
            let summary = app.api.fetch_dashboard_summary().await?;
            app.out.emit(&summary, crate::output::dashboard)
        }
        Command::Zones { command } => tables::zones(&app, command).await,
        Command::Tables { command } => tables::tables(&app, command).await,
        Command::Products { command } => menu::products(&app, command).await,
        Command::Categories { command } => menu::categories(&app, command).await,
        Command::Users { command } => staff::users(&app, command).await,
        Command::Roles { command } => staff::roles(&app, command).await,
        Command::Permissions => staff::permissions(&app).await,
    }
}

#[cfg(test)]
mod tests {
    use comandapp_core::auth::MemoryTokenStore;

    use super::*;

    fn app(store: MemoryTokenStore) -> App {
        let session = Arc::new(SessionStore::new(store));
        App::new(Config::default(), session, Output { json: false }).unwrap()
    }

    #[test]
    fn test_protected_page_without_token_is_refused() {
        let app = app(MemoryTokenStore::new());
        let err = app.require(Route::Products).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Productos"));
        assert!(message.contains("/login"));
    }

    #[test]
    fn test_public_page_is_always_allowed() {
        let app = app(MemoryTokenStore::new());
        assert!(app.require(Route::Login).is_ok());
    }

    #[test]
    fn test_present_token_passes_even_if_undecodable() {
        // Authentication is token presence; the default policy latches
        // initialization on the first decode attempt.
        let app = app(MemoryTokenStore::with_token("not-a-jwt"));
        assert!(app.require(Route::Tables).is_ok());
    }
}
