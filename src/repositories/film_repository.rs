// src/repositories/film_repository.rs
//
// Film persistence: the films table plus its film_genre links

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use rusqlite::{params, Connection, Row};

use crate::db::ConnectionPool;
use crate::domain::{DomainError, Film, FilmRecord, Genre, Mpa};
use crate::error::{AppError, AppResult};
use crate::repositories::{date_column, format_date};

#[cfg_attr(test, mockall::automock)]
pub trait FilmRepository: Send + Sync {
    /// Inserts the film and its genre links atomically, returns the new id
    fn insert(&self, film: &FilmRecord) -> AppResult<i64>;
    /// Replaces all columns and the whole genre set atomically
    fn update(&self, id: i64, film: &FilmRecord) -> AppResult<()>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Film>>;
    fn list_all(&self) -> AppResult<Vec<Film>>;
    fn exists(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteFilmRepository {
    pool: Arc<ConnectionPool>,
}

const FILM_SELECT: &str = "SELECT f.film_id, f.name, f.description, f.release_date, f.duration,
                                  f.mpa_id, m.mpa_name, m.description AS mpa_description
                           FROM films f
                           JOIN mpa_rating m ON f.mpa_id = m.mpa_id";

impl SqliteFilmRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a films/mpa_rating join row; genres are attached separately
    fn row_to_film(row: &Row) -> Result<Film, rusqlite::Error> {
        let duration: i64 = row.get("duration")?;
        Ok(Film {
            id: row.get("film_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            release_date: date_column(row, "release_date")?,
            duration: duration as u32,
            mpa: Mpa {
                id: row.get("mpa_id")?,
                name: row.get("mpa_name")?,
                description: row.get("mpa_description")?,
            },
            genres: Vec::new(),
        })
    }

    fn insert_genres(conn: &Connection, film_id: i64, genre_ids: &BTreeSet<i64>) -> AppResult<()> {
        let mut stmt = conn.prepare("INSERT INTO film_genre (film_id, genre_id) VALUES (?1, ?2)")?;
        for genre_id in genre_ids {
            stmt.execute(params![film_id, genre_id])?;
        }
        Ok(())
    }

    fn genres_for_film(conn: &Connection, film_id: i64) -> AppResult<Vec<Genre>> {
        let mut stmt = conn.prepare(
            "SELECT g.genre_id, g.genre_name
             FROM genre g
             JOIN film_genre fg ON g.genre_id = fg.genre_id
             WHERE fg.film_id = ?1
             ORDER BY g.genre_id",
        )?;

        let genres = stmt
            .query_map(params![film_id], |row| {
                Ok(Genre {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    /// Every film's genres in one query, each list in ascending genre id order
    fn genres_by_film(conn: &Connection) -> AppResult<HashMap<i64, Vec<Genre>>> {
        let mut stmt = conn.prepare(
            "SELECT fg.film_id, g.genre_id, g.genre_name
             FROM film_genre fg
             JOIN genre g ON fg.genre_id = g.genre_id
             ORDER BY fg.film_id, g.genre_id",
        )?;

        let mut by_film: HashMap<i64, Vec<Genre>> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                Genre {
                    id: row.get(1)?,
                    name: row.get(2)?,
                },
            ))
        })?;
        for row in rows {
            let (film_id, genre) = row?;
            by_film.entry(film_id).or_default().push(genre);
        }

        Ok(by_film)
    }
}

impl FilmRepository for SqliteFilmRepository {
    fn insert(&self, film: &FilmRecord) -> AppResult<i64> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO films (name, description, release_date, duration, mpa_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                film.name,
                film.description,
                format_date(film.release_date),
                film.duration as i64,
                film.mpa_id,
            ],
        )?;
        let id = tx.last_insert_rowid();
        Self::insert_genres(&tx, id, &film.genre_ids)?;

        tx.commit()?;
        Ok(id)
    }

    fn update(&self, id: i64, film: &FilmRecord) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let rows_affected = tx.execute(
            "UPDATE films
             SET name = ?1, description = ?2, release_date = ?3, duration = ?4, mpa_id = ?5
             WHERE film_id = ?6",
            params![
                film.name,
                film.description,
                format_date(film.release_date),
                film.duration as i64,
                film.mpa_id,
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::Domain(DomainError::not_found("Film", id)));
        }

        tx.execute("DELETE FROM film_genre WHERE film_id = ?1", params![id])?;
        Self::insert_genres(&tx, id, &film.genre_ids)?;

        tx.commit()?;
        Ok(())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Film>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE f.film_id = ?1", FILM_SELECT))?;

        let mut film = match stmt.query_row(params![id], Self::row_to_film) {
            Ok(film) => film,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(AppError::Database(e)),
        };

        film.genres = Self::genres_for_film(&conn, id)?;
        Ok(Some(film))
    }

    fn list_all(&self) -> AppResult<Vec<Film>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY f.film_id", FILM_SELECT))?;
        let mut films: Vec<Film> = stmt
            .query_map([], Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut genres = Self::genres_by_film(&conn)?;
        for film in &mut films {
            film.genres = genres.remove(&film.id).unwrap_or_default();
        }

        Ok(films)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM films WHERE film_id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use chrono::NaiveDate;

    fn record(name: &str, genre_ids: &[i64]) -> FilmRecord {
        FilmRecord {
            name: name.to_string(),
            description: "desc".to_string(),
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            duration: 120,
            mpa_id: 1,
            genre_ids: genre_ids.iter().copied().collect(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let (pool, _dir) = create_test_pool().unwrap();
        let repo = SqliteFilmRepository::new(pool);

        let id = repo.insert(&record("Film", &[3, 1])).unwrap();
        assert!(id > 0);

        let film = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(film.name, "Film");
        assert_eq!(film.mpa.name, "G");
        assert_eq!(film.genre_ids(), vec![1, 3]);
        assert_eq!(film.release_date, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());

        assert!(repo.exists(id).unwrap());
        assert!(!repo.exists(id + 100).unwrap());
        assert!(repo.get_by_id(id + 100).unwrap().is_none());
    }

    #[test]
    fn test_update_replaces_genres() {
        let (pool, _dir) = create_test_pool().unwrap();
        let repo = SqliteFilmRepository::new(pool);

        let id = repo.insert(&record("Film", &[1, 2])).unwrap();
        let mut changed = record("Renamed", &[4]);
        changed.mpa_id = 4;
        repo.update(id, &changed).unwrap();

        let film = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(film.name, "Renamed");
        assert_eq!(film.mpa.name, "R");
        assert_eq!(film.genre_ids(), vec![4]);
    }

    #[test]
    fn test_update_missing_film() {
        let (pool, _dir) = create_test_pool().unwrap();
        let repo = SqliteFilmRepository::new(pool);

        let err = repo.update(77, &record("Ghost", &[])).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_failed_insert_leaves_no_film_behind() {
        let (pool, _dir) = create_test_pool().unwrap();
        let repo = SqliteFilmRepository::new(pool);

        // Unknown genre id violates the foreign key after the film row was written
        assert!(repo.insert(&record("Broken", &[1, 999])).is_err());
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_list_all_loads_genres_per_film() {
        let (pool, _dir) = create_test_pool().unwrap();
        let repo = SqliteFilmRepository::new(pool);

        let first = repo.insert(&record("First", &[2])).unwrap();
        let second = repo.insert(&record("Second", &[])).unwrap();

        let films = repo.list_all().unwrap();
        assert_eq!(films.len(), 2);
        assert_eq!(films[0].id, first);
        assert_eq!(films[0].genre_ids(), vec![2]);
        assert_eq!(films[1].id, second);
        assert!(films[1].genres.is_empty());
    }
}
