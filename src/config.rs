// src/config.rs
//
// Database configuration
//
// Resolution order for each setting:
// 1. Environment variable, when set
// 2. Built-in default

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const DB_PATH_ENV_KEY: &str = "FILMORATE_DB_PATH";
pub const DB_POOL_SIZE_ENV_KEY: &str = "FILMORATE_DB_POOL_SIZE";

const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout_ms: u32,
}

impl DatabaseConfig {
    /// Config for an explicit database file with default pool settings
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Loads configuration from the environment, falling back to defaults.
    ///
    /// Default path: {APP_DATA}/filmorate/filmorate.db
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match lookup(DB_PATH_ENV_KEY).filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let mut config = Self::at(path);

        if let Some(raw) = lookup(DB_POOL_SIZE_ENV_KEY) {
            config.max_connections = match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(AppError::Config(format!(
                        "{} must be a positive integer, got '{}'",
                        DB_POOL_SIZE_ENV_KEY, raw
                    )))
                }
            };
        }

        Ok(config)
    }
}

fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("filmorate").join("filmorate.db"))
}
