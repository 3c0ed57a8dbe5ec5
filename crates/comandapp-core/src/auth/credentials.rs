use anyhow::{Context, Result};
use keyring::Entry;
use tracing::debug;

use super::store::{TokenStore, TOKEN_KEY};

const SERVICE_NAME: &str = "comandapp";

/// Token slot in the OS keychain.
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Use a different keychain service name (one slot per service).
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, TOKEN_KEY).context("Failed to create keyring entry")
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Option<String> {
        let entry = self.entry().ok()?;
        match entry.get_password() {
            Ok(token) => Some(token),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                debug!(error = %e, "Failed to read token from keychain");
                None
            }
        }
    }

    fn set(&self, token: Option<&str>) -> Result<()> {
        let entry = self.entry()?;
        match token {
            Some(token) => entry
                .set_password(token)
                .context("Failed to store token in keychain"),
            None => match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(e).context("Failed to delete token from keychain"),
            },
        }
    }
}
