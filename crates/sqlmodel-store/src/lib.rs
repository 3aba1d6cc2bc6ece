//! # sqlmodel-store
//!
//! SQLite-backed storage for models described with `sqlmodel-schema`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  SqliteStore                                 │
//! │    init / close      (Unopened→Open→Closed)  │
//! │    exec / query / exec_batch / create_table  │
//! ├──────────────────────────────────────────────┤
//! │  provision::ensure_dir  (parent of the file) │
//! ├──────────────────────────────────────────────┤
//! │  rusqlite::Connection  (spawn_blocking)      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use sqlmodel_store::{SqliteStore, StoreConfig, sql_params};
//!
//! let mut store = SqliteStore::new(StoreConfig::new().with_file("data/app.db"));
//! store.init().await?;
//! store.create_table(&spec).await?;
//! let res = store.exec("INSERT INTO user (email) VALUES (?1)", &sql_params!["a@b.c"]).await?;
//! let rows = store.query("SELECT * FROM user", &[]).await?;
//! store.close().await?;
//! ```

pub mod config;
pub mod error;
pub mod provision;
pub mod store;
pub mod value;

// ── re-exports ───────────────────────────────────────────────────────

pub use config::{StoreConfig, StoreLocation};
pub use error::{ErrorKind, StoreError, StoreResult};
pub use provision::ensure_dir;
pub use store::{SqliteStore, StoreState};
pub use value::{ExecResult, Row, SqlValue};
