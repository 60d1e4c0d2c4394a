// src/repositories/mpa_repository.rs

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::Mpa;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait MpaRepository: Send + Sync {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Mpa>>;
    fn list_all(&self) -> AppResult<Vec<Mpa>>;
}

pub struct SqliteMpaRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMpaRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_mpa(row: &Row) -> Result<Mpa, rusqlite::Error> {
        Ok(Mpa {
            id: row.get("mpa_id")?,
            name: row.get("mpa_name")?,
            description: row.get("description")?,
        })
    }
}

impl MpaRepository for SqliteMpaRepository {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Mpa>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT mpa_id, mpa_name, description FROM mpa_rating WHERE mpa_id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_mpa) {
            Ok(mpa) => Ok(Some(mpa)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Mpa>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT mpa_id, mpa_name, description FROM mpa_rating ORDER BY mpa_id")?;

        let ratings = stmt
            .query_map([], Self::row_to_mpa)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[test]
    fn test_seeded_ratings() {
        let (pool, _dir) = create_test_pool().unwrap();
        let repo = SqliteMpaRepository::new(pool);

        let all = repo.list_all().unwrap();
        let names: Vec<&str> = all.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["G", "PG", "PG-13", "R", "NC-17"]);

        let pg13 = repo.get_by_id(3).unwrap().unwrap();
        assert_eq!(pg13.name, "PG-13");
        assert!(pg13.description.is_some());

        assert!(repo.get_by_id(9999).unwrap().is_none());
    }
}
