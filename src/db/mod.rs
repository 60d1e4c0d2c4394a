// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema initialization

pub mod connection;
pub mod migrations;

pub use connection::{create_connection_pool, get_connection, ConnectionPool, PooledConn};

#[cfg(test)]
pub(crate) use connection::create_test_pool;

pub use migrations::{get_database_stats, initialize_database, DatabaseStats};
