//! SQLite connection management for the Vitalog service.
//!
//! The pool is created once at startup and handed to the repositories
//! explicitly; there is no process-global pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use r2d2_sqlite::SqliteConnectionManager;
use thiserror::Error;
use tracing::info;

/// Shared SQLite connection pool
pub type DatabasePool = Arc<r2d2::Pool<SqliteConnectionManager>>;

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file; `None` selects an in-memory
    /// database (used by tests)
    pub sqlite_path: Option<PathBuf>,

    /// Connection pool size
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: Some(PathBuf::from("data/vitalog.db")),
            pool_size: 8,
        }
    }
}

impl DatabaseConfig {
    /// Configuration backed by a file at the given path
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            sqlite_path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Configuration backed by a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            sqlite_path: None,
            ..Self::default()
        }
    }
}

/// Open the connection pool and make sure the schema exists.
pub fn connect(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let manager = match &config.sqlite_path {
        Some(path) => {
            info!("Opening SQLite database at {}", path.display());
            SqliteConnectionManager::file(path)
        }
        None => {
            info!("Opening in-memory SQLite database");
            // A single connection keeps the in-memory database alive and
            // visible to every borrower of the pool.
            SqliteConnectionManager::memory()
        }
    };

    let pool_size = if config.sqlite_path.is_none() {
        1
    } else {
        config.pool_size
    };

    let pool = r2d2::Pool::builder().max_size(pool_size).build(manager)?;

    init_schema(&pool)?;

    Ok(Arc::new(pool))
}

/// Create the tables used by this service if they are missing.
fn init_schema(pool: &r2d2::Pool<SqliteConnectionManager>) -> Result<(), DatabaseError> {
    let conn = pool.get()?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
             id INTEGER PRIMARY KEY,
             email TEXT,
             name TEXT
         );
         CREATE TABLE IF NOT EXISTS health_records (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             patient_id INTEGER NOT NULL REFERENCES users(id),
             weight REAL NOT NULL,
             bp TEXT NOT NULL,
             glucose REAL NOT NULL,
             timestamp TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_health_records_patient
             ON health_records(patient_id);",
    )?;

    Ok(())
}
