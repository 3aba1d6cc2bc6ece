//! Store configuration.
//!
//! [`StoreConfig`] is read from TOML, either from a `[store]` table or from
//! top-level keys:
//!
//! ```toml
//! [store]
//! file = "data/app.db"
//! busy_timeout_ms = 2000
//! ```
//!
//! Without a `file` the store lives in memory and is discarded on close.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{StoreError, StoreResult};

/// Path SQLite understands as a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Non-persistent, private to one connection.
    Memory,
    /// An absolute path to the database file.
    File(PathBuf),
}

impl StoreLocation {
    /// Path handed to SQLite.
    pub fn as_path(&self) -> &Path {
        match self {
            Self::Memory => Path::new(MEMORY_PATH),
            Self::File(path) => path,
        }
    }
}

/// Settings for one [`SqliteStore`](crate::store::SqliteStore).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file, relative to the working directory or absolute.
    ///
    /// Default: none (in-memory).
    pub file: Option<PathBuf>,

    /// How long SQLite waits on a locked database before failing, in
    /// milliseconds.
    ///
    /// Default: **5 000 ms**.
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file: None,
            busy_timeout_ms: 5_000,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    store: Option<StoreConfig>,
    #[serde(flatten)]
    top_level: StoreConfig,
}

impl StoreConfig {
    /// Create an in-memory configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database file.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the busy timeout (in milliseconds).
    pub fn with_busy_timeout_ms(mut self, ms: u64) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        let parsed: ConfigFile = toml::from_str(s)?;
        Ok(parsed.store.unwrap_or(parsed.top_level))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the configured file against `cwd`.
    ///
    /// A missing or empty `file` means [`StoreLocation::Memory`].
    pub fn location_in(&self, cwd: &Path) -> StoreLocation {
        match &self.file {
            Some(file) if !file.as_os_str().is_empty() => StoreLocation::File(cwd.join(file)),
            _ => StoreLocation::Memory,
        }
    }

    /// Resolve the configured file against the process working directory.
    pub fn location(&self) -> StoreResult<StoreLocation> {
        let cwd = std::env::current_dir().map_err(|e| StoreError::ConfigIo {
            path: PathBuf::from("."),
            source: e,
        })?;
        Ok(self.location_in(&cwd))
    }
}
