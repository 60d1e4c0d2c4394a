// src/repositories/user_repository.rs

use std::sync::Arc;

use rusqlite::{params, params_from_iter, Row};

use crate::db::ConnectionPool;
use crate::domain::{DomainError, User, UserRecord};
use crate::error::{AppError, AppResult};
use crate::repositories::{format_date, optional_date_column, placeholders, MAX_BATCH_PARAMS};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: &UserRecord) -> AppResult<i64>;
    fn update(&self, id: i64, user: &UserRecord) -> AppResult<()>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<User>>;
    fn list_all(&self) -> AppResult<Vec<User>>;
    /// Batch lookup ordered by id; unknown ids are skipped
    fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<User>>;
    fn exists(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        Ok(User {
            id: row.get("user_id")?,
            email: row.get("email")?,
            login: row.get("login")?,
            name: row.get("name")?,
            birthday: optional_date_column(row, "birthday")?,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    fn insert(&self, user: &UserRecord) -> AppResult<i64> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO users (email, login, name, birthday) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.map(format_date),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, id: i64, user: &UserRecord) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE users SET email = ?1, login = ?2, name = ?3, birthday = ?4 WHERE user_id = ?5",
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.map(format_date),
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::Domain(DomainError::not_found("User", id)));
        }

        Ok(())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT user_id, email, login, name, birthday FROM users WHERE user_id = ?1",
        )?;

        match stmt.query_row(params![id], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT user_id, email, login, name, birthday FROM users ORDER BY user_id",
        )?;

        let users = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.pool.get()?;
        let mut users = Vec::new();

        for chunk in ids.chunks(MAX_BATCH_PARAMS) {
            let sql = format!(
                "SELECT user_id, email, login, name, birthday FROM users
                 WHERE user_id IN ({})",
                placeholders(chunk.len())
            );
            let mut stmt = conn.prepare(&sql)?;

            for user in stmt.query_map(params_from_iter(chunk.iter()), Self::row_to_user)? {
                users.push(user?);
            }
        }

        users.sort_by_key(|user| user.id);
        users.dedup_by_key(|user| user.id);
        Ok(users)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE user_id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
