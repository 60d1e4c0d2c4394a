// src/repositories/like_repository.rs
//
// Film <-> user likes; membership only

use std::sync::Arc;

use rusqlite::params;

use crate::db::ConnectionPool;
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait LikeRepository: Send + Sync {
    /// Returns false when the pair was already present
    fn add(&self, film_id: i64, user_id: i64) -> AppResult<bool>;
    /// Returns false when there was nothing to remove
    fn remove(&self, film_id: i64, user_id: i64) -> AppResult<bool>;
    fn count_for_film(&self, film_id: i64) -> AppResult<u64>;
    /// (film_id, likes) for every film with at least one like
    fn like_counts(&self) -> AppResult<Vec<(i64, u64)>>;
}

pub struct SqliteLikeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteLikeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl LikeRepository for SqliteLikeRepository {
    fn add(&self, film_id: i64, user_id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "INSERT OR IGNORE INTO film_likes (film_id, user_id) VALUES (?1, ?2)",
            params![film_id, user_id],
        )?;

        Ok(rows_affected > 0)
    }

    fn remove(&self, film_id: i64, user_id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM film_likes WHERE film_id = ?1 AND user_id = ?2",
            params![film_id, user_id],
        )?;

        Ok(rows_affected > 0)
    }

    fn count_for_film(&self, film_id: i64) -> AppResult<u64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM film_likes WHERE film_id = ?1",
            params![film_id],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    fn like_counts(&self) -> AppResult<Vec<(i64, u64)>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT film_id, COUNT(user_id) FROM film_likes GROUP BY film_id ORDER BY film_id",
        )?;

        let counts = stmt
            .query_map([], |row| {
                let film_id: i64 = row.get(0)?;
                let likes: i64 = row.get(1)?;
                Ok((film_id, likes as u64))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::domain::{FilmRecord, UserRecord};
    use crate::repositories::{
        FilmRepository, SqliteFilmRepository, SqliteUserRepository, UserRepository,
    };
    use chrono::NaiveDate;

    fn setup() -> (SqliteLikeRepository, i64, Vec<i64>, tempfile::TempDir) {
        let (pool, dir) = create_test_pool().unwrap();
        let film_id = SqliteFilmRepository::new(pool.clone())
            .insert(&FilmRecord {
                name: "Film".to_string(),
                description: String::new(),
                release_date: NaiveDate::from_ymd_opt(2001, 5, 5).unwrap(),
                duration: 90,
                mpa_id: 2,
                genre_ids: Default::default(),
            })
            .unwrap();
        let user_repo = SqliteUserRepository::new(pool.clone());
        let users = (0..2)
            .map(|i| {
                user_repo
                    .insert(&UserRecord {
                        email: format!("fan{}@example.com", i),
                        login: format!("fan{}", i),
                        name: format!("fan{}", i),
                        birthday: None,
                    })
                    .unwrap()
            })
            .collect();
        (SqliteLikeRepository::new(pool), film_id, users, dir)
    }

    #[test]
    fn test_add_reports_duplicates() {
        let (repo, film, users, _dir) = setup();

        assert!(repo.add(film, users[0]).unwrap());
        assert!(!repo.add(film, users[0]).unwrap());
        assert_eq!(repo.count_for_film(film).unwrap(), 1);
    }

    #[test]
    fn test_remove_reports_missing() {
        let (repo, film, users, _dir) = setup();

        assert!(!repo.remove(film, users[0]).unwrap());
        repo.add(film, users[0]).unwrap();
        assert!(repo.remove(film, users[0]).unwrap());
        assert_eq!(repo.count_for_film(film).unwrap(), 0);
    }

    #[test]
    fn test_like_counts() {
        let (repo, film, users, _dir) = setup();

        assert!(repo.like_counts().unwrap().is_empty());
        repo.add(film, users[0]).unwrap();
        repo.add(film, users[1]).unwrap();
        assert_eq!(repo.like_counts().unwrap(), vec![(film, 2)]);
    }
}
