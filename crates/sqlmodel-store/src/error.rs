//! Error types for the sqlmodel-store crate.
//!
//! All store operations return [`StoreError`] via [`StoreResult`]. Errors are
//! never logged here; the caller decides how to surface them.

use std::path::PathBuf;

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Broad classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Filesystem provisioning, or opening/closing the engine handle.
    Io,
    /// Statement execution inside the engine.
    Driver,
    /// An operation was called in the wrong lifecycle state.
    Lifecycle,
    /// Configuration could not be read or parsed.
    Config,
}

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A directory could not be checked or created.
    #[error("failed to provision {}: {source}", .path.display())]
    Provision {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database could not be opened.
    #[error("failed to open database {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The database could not be closed.
    #[error("failed to close database: {0}")]
    Close(#[source] rusqlite::Error),

    /// SQLite rejected or failed a statement.
    #[error("sqlite error: {0}")]
    Driver(#[from] rusqlite::Error),

    /// The store has not been initialized.
    #[error("store is not open")]
    NotOpen,

    /// `init` was called on a store that is already open.
    #[error("store is already open")]
    AlreadyOpen,

    /// The store has been closed and cannot be reused.
    #[error("store is closed")]
    Closed,

    /// `close` was called while a statement still holds the connection.
    #[error("connection is still in use")]
    InUse,

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking task was cancelled or panicked.
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl StoreError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Provision { .. } | Self::Open { .. } | Self::Close(_) => ErrorKind::Io,
            Self::Driver(_) | Self::TaskJoin(_) => ErrorKind::Driver,
            Self::NotOpen | Self::AlreadyOpen | Self::Closed | Self::InUse => ErrorKind::Lifecycle,
            Self::Config(_) | Self::ConfigIo { .. } => ErrorKind::Config,
        }
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
