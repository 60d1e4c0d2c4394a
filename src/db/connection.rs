// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a connection pool
///
/// Every connection gets:
/// - foreign key enforcement (off by default in SQLite)
/// - WAL journal for concurrent readers
/// - the configured busy timeout
pub fn create_connection_pool(config: &DatabaseConfig) -> AppResult<ConnectionPool> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let busy_timeout_ms = config.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(&config.path).with_init(move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = {};",
            busy_timeout_ms
        ))
    });

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    log::debug!(
        "Connection pool ready: {} (max {} connections)",
        config.path.display(),
        config.max_connections
    );

    Ok(pool)
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Pool over a fresh, fully initialized database in a temporary directory.
/// The directory is removed when the returned guard is dropped.
#[cfg(test)]
pub(crate) fn create_test_pool(
) -> AppResult<(std::sync::Arc<ConnectionPool>, tempfile::TempDir)> {
    let dir = tempfile::tempdir()?;
    let mut config = DatabaseConfig::at(dir.path().join("filmorate-test.db"));
    config.max_connections = 4;

    let pool = create_connection_pool(&config)?;
    {
        let conn = get_connection(&pool)?;
        crate::db::initialize_database(&conn)?;
    }
    Ok((std::sync::Arc::new(pool), dir))
}
