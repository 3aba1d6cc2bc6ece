//! SQLite store: handle lifecycle and statement execution.
//!
//! A [`SqliteStore`] moves through `Unopened → Open → Closed`. `init` and
//! `close` take `&mut self`, so no statement can be in flight while the
//! handle changes. Statements run on the blocking pool via
//! `tokio::task::spawn_blocking`; the connection mutex serializes them.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rusqlite::{Connection, params_from_iter};
use sqlmodel_schema::{TableSpec, generate_create_table};
use tracing::{debug, info};

use crate::config::{StoreConfig, StoreLocation};
use crate::error::{StoreError, StoreResult};
use crate::provision;
use crate::value::{ExecResult, Row, SqlValue};

/// Observable lifecycle state of a [`SqliteStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unopened,
    Open,
    Closed,
}

enum Handle {
    Unopened,
    Open(Arc<Mutex<Connection>>),
    Closed,
}

/// A single SQLite database owned by one caller.
pub struct SqliteStore {
    config: StoreConfig,
    handle: Handle,
}

impl SqliteStore {
    /// Create an unopened store. Nothing touches the filesystem until
    /// [`init`](Self::init).
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            handle: Handle::Unopened,
        }
    }

    /// Create an unopened in-memory store.
    pub fn in_memory() -> Self {
        Self::new(StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn state(&self) -> StoreState {
        match self.handle {
            Handle::Unopened => StoreState::Unopened,
            Handle::Open(_) => StoreState::Open,
            Handle::Closed => StoreState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == StoreState::Open
    }

    // ── lifecycle ────────────────────────────────────────────────────

    /// Provision the database directory and open the connection.
    ///
    /// On failure the store stays `Unopened` and `init` may be retried.
    pub async fn init(&mut self) -> StoreResult<()> {
        match self.handle {
            Handle::Unopened => {}
            Handle::Open(_) => return Err(StoreError::AlreadyOpen),
            Handle::Closed => return Err(StoreError::Closed),
        }

        let location = self.config.location()?;
        if let StoreLocation::File(path) = &location {
            if let Some(parent) = path.parent() {
                provision::ensure_dir(parent).await?;
            }
        }

        info!(path = %location.as_path().display(), "opening database");
        let busy_timeout = Duration::from_millis(self.config.busy_timeout_ms);
        let conn =
            tokio::task::spawn_blocking(move || open_connection(&location, busy_timeout)).await??;

        self.handle = Handle::Open(Arc::new(Mutex::new(conn)));
        Ok(())
    }

    /// Close the connection.
    ///
    /// If SQLite refuses to close, the store stays `Open` and the error is
    /// returned.
    pub async fn close(&mut self) -> StoreResult<()> {
        let conn = match std::mem::replace(&mut self.handle, Handle::Closed) {
            Handle::Open(conn) => conn,
            Handle::Unopened => {
                self.handle = Handle::Unopened;
                return Err(StoreError::NotOpen);
            }
            Handle::Closed => return Err(StoreError::Closed),
        };

        match tokio::task::spawn_blocking(move || close_connection(conn)).await? {
            Ok(()) => {
                info!("database closed");
                Ok(())
            }
            Err((conn, err)) => {
                self.handle = Handle::Open(conn);
                Err(err)
            }
        }
    }

    // ── statements ───────────────────────────────────────────────────

    /// Execute a single mutating statement.
    pub async fn exec(&self, sql: &str, params: &[SqlValue]) -> StoreResult<ExecResult> {
        debug!(sql = %sql, params = ?params, "exec");
        let sql = sql.to_string();
        let params = params.to_vec();
        self.with_connection(move |conn| {
            let before = conn.last_insert_rowid();
            let mut stmt = conn.prepare(&sql)?;
            let changed = stmt.execute(params_from_iter(params.iter()))?;
            let after = conn.last_insert_rowid();
            let insert_id = (changed > 0 && after != before).then_some(after);
            Ok(ExecResult {
                affected_rows: changed as u64,
                insert_id,
            })
        })
        .await
    }

    /// Execute a parameterless batch of `;`-separated statements.
    pub async fn exec_batch(&self, sql: &str) -> StoreResult<()> {
        debug!(sql = %sql, "exec batch");
        let sql = sql.to_string();
        self.with_connection(move |conn| {
            conn.execute_batch(&sql)?;
            Ok(())
        })
        .await
    }

    /// Run a read statement and collect every row.
    pub async fn query(&self, sql: &str, params: &[SqlValue]) -> StoreResult<Vec<Row>> {
        debug!(sql = %sql, params = ?params, "query");
        let sql = sql.to_string();
        let params = params.to_vec();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
            let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
                let mut cells = Vec::with_capacity(names.len());
                for (i, name) in names.iter().enumerate() {
                    cells.push((name.clone(), SqlValue::from(row.get_ref(i)?)));
                }
                Ok(Row::new(cells))
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await
    }

    /// Generate and run the DDL for `spec`.
    pub async fn create_table(&self, spec: &TableSpec) -> StoreResult<()> {
        info!(table = %spec.table, "creating table");
        self.exec_batch(&generate_create_table(spec)).await
    }

    /// Run a closure against the open connection on the blocking pool.
    pub async fn with_connection<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = match &self.handle {
            Handle::Open(conn) => Arc::clone(conn),
            Handle::Unopened => return Err(StoreError::NotOpen),
            Handle::Closed => return Err(StoreError::Closed),
        };
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::TaskJoin(format!("mutex poisoned: {e}")))?;
            f(&conn)
        })
        .await?
    }
}

fn open_connection(location: &StoreLocation, busy_timeout: Duration) -> StoreResult<Connection> {
    let open_error = |source: rusqlite::Error| StoreError::Open {
        path: location.as_path().to_path_buf(),
        source,
    };

    let conn = match location {
        StoreLocation::Memory => Connection::open_in_memory(),
        StoreLocation::File(path) => Connection::open(path),
    }
    .map_err(open_error)?;

    conn.busy_timeout(busy_timeout).map_err(open_error)?;
    debug!(busy_timeout_ms = busy_timeout.as_millis() as u64, "connection configured");

    Ok(conn)
}

type CloseFailure = (Arc<Mutex<Connection>>, StoreError);

fn close_connection(conn: Arc<Mutex<Connection>>) -> Result<(), CloseFailure> {
    let conn = Arc::try_unwrap(conn)
        .map_err(|shared| (shared, StoreError::InUse))?
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);

    conn.close()
        .map_err(|(conn, e)| (Arc::new(Mutex::new(conn)), StoreError::Close(e)))
}

// ── tests ────────────────────────────────────────────────────────────
