//! SQLite persistence: connection setup, schema, and the per-table queries.

pub mod data;
pub mod db_utils;
pub mod employees;
pub mod entries;
pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod properties;
pub mod timers;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use pool::DbPool;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Handle on the database file shared by the HTTP layer and the backup scheduler.
///
/// It holds no connection: every operation opens its own, so no lock is kept
/// in-process between requests and SQLite's file locking arbitrates writers.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
        }
    }

    /// Build the store described by `cfg` and make sure the schema is in place.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let store = Self::new(&cfg.database, Duration::from_millis(cfg.busy_timeout_ms));
        store.init()?;
        Ok(store)
    }

    pub fn init(&self) -> AppResult<()> {
        let pool = self.connect()?;
        initialize::init_db(&pool.conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> AppResult<DbPool> {
        DbPool::open(&self.path, self.busy_timeout)
    }

    /// Run `func` on a fresh connection on the blocking thread pool.
    pub async fn run<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut pool = store.connect()?;
            pool.with_conn(func)
        })
        .await
        .map_err(|e| AppError::Other(format!("store task failed: {}", e)))?
    }

    /// Fold the write-ahead log back into the main database file.
    pub fn checkpoint(&self) -> AppResult<()> {
        let pool = self.connect()?;
        db_utils::checkpoint(&pool.conn)
    }

    /// Flush pending WAL content on shutdown.
    pub fn close(self) -> AppResult<()> {
        self.checkpoint()?;
        tracing::info!(path = %self.path.display(), "store flushed");
        Ok(())
    }
}
