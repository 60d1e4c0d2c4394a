// src/repositories/genre_repository.rs

use std::sync::Arc;

use rusqlite::{params, params_from_iter, Row};

use crate::db::ConnectionPool;
use crate::domain::Genre;
use crate::error::{AppError, AppResult};
use crate::repositories::{placeholders, MAX_BATCH_PARAMS};

#[cfg_attr(test, mockall::automock)]
pub trait GenreRepository: Send + Sync {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Genre>>;
    fn list_all(&self) -> AppResult<Vec<Genre>>;
    /// Batch lookup; ids with no genre are simply absent from the result
    fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Genre>>;
}

pub struct SqliteGenreRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteGenreRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_genre(row: &Row) -> Result<Genre, rusqlite::Error> {
        Ok(Genre {
            id: row.get("genre_id")?,
            name: row.get("genre_name")?,
        })
    }
}

impl GenreRepository for SqliteGenreRepository {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT genre_id, genre_name FROM genre WHERE genre_id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_genre) {
            Ok(genre) => Ok(Some(genre)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT genre_id, genre_name FROM genre ORDER BY genre_id")?;

        let genres = stmt
            .query_map([], Self::row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.pool.get()?;
        let mut genres = Vec::new();

        for chunk in ids.chunks(MAX_BATCH_PARAMS) {
            let sql = format!(
                "SELECT genre_id, genre_name FROM genre WHERE genre_id IN ({})",
                placeholders(chunk.len())
            );
            let mut stmt = conn.prepare(&sql)?;

            for genre in stmt.query_map(params_from_iter(chunk.iter()), Self::row_to_genre)? {
                genres.push(genre?);
            }
        }

        genres.sort_by_key(|genre| genre.id);
        genres.dedup_by_key(|genre| genre.id);
        Ok(genres)
    }
}
