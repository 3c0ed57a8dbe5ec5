use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Key under which the session token lives in every durable store.
pub const TOKEN_KEY: &str = "token";

/// Key/value file name in the data directory
const STORAGE_FILE: &str = "storage.json";

/// Durable, synchronous slot for the session token.
///
/// Implementations must keep `get` free of side effects. `set(None)` removes
/// the entry; no expiry is enforced at this layer.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;

    fn set(&self, token: Option<&str>) -> Result<()>;
}

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, token: Option<&str>) -> Result<()> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token.map(str::to_string);
        Ok(())
    }
}

/// JSON key/value file, laid out like browser local storage.
///
/// Keys other than [`TOKEN_KEY`] are left untouched on write.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    data_dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    fn read_entries(path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read storage file {}", path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage file {}", path.display()))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match Self::read_entries(&self.path()) {
            Ok(entries) => entries
                .get(TOKEN_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(e) => {
                debug!(error = %e, "Token storage unreadable, treating as empty");
                None
            }
        }
    }

    fn set(&self, token: Option<&str>) -> Result<()> {
        let path = self.path();
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Failed to create {}", self.data_dir.display()))?;

        // A corrupt file is replaced rather than blocking logout
        let mut entries = Self::read_entries(&path).unwrap_or_default();
        match token {
            Some(token) => {
                entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
            }
            None => {
                entries.remove(TOKEN_KEY);
            }
        }

        let contents = serde_json::to_string_pretty(&entries)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).context("Failed to write token storage")?;
        std::fs::rename(&tmp, &path).context("Failed to replace token storage")?;
        Ok(())
    }
}
