// src/services/catalog_service.rs
//
// Read-only access to the seeded reference data (genres, MPA ratings)

use std::sync::Arc;

use crate::domain::{DomainError, Genre, Mpa};
use crate::error::{AppError, AppResult};
use crate::repositories::{GenreRepository, MpaRepository};

pub struct CatalogService {
    genre_repo: Arc<dyn GenreRepository>,
    mpa_repo: Arc<dyn MpaRepository>,
}

impl CatalogService {
    pub fn new(genre_repo: Arc<dyn GenreRepository>, mpa_repo: Arc<dyn MpaRepository>) -> Self {
        Self {
            genre_repo,
            mpa_repo,
        }
    }

    pub fn get_all_genres(&self) -> AppResult<Vec<Genre>> {
        self.genre_repo.list_all()
    }

    pub fn get_genre(&self, genre_id: i64) -> AppResult<Genre> {
        self.genre_repo
            .get_by_id(genre_id)?
            .ok_or(AppError::Domain(DomainError::not_found("Genre", genre_id)))
    }

    pub fn get_all_mpa(&self) -> AppResult<Vec<Mpa>> {
        self.mpa_repo.list_all()
    }

    pub fn get_mpa(&self, mpa_id: i64) -> AppResult<Mpa> {
        self.mpa_repo
            .get_by_id(mpa_id)?
            .ok_or(AppError::Domain(DomainError::not_found("MPA", mpa_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::repositories::{
        MockGenreRepository, MockMpaRepository, SqliteGenreRepository, SqliteMpaRepository,
    };

    #[test]
    fn test_seeded_reference_data() {
        let (pool, _dir) = create_test_pool().unwrap();
        let service = CatalogService::new(
            Arc::new(SqliteGenreRepository::new(pool.clone())),
            Arc::new(SqliteMpaRepository::new(pool)),
        );

        let mpa: Vec<String> = service
            .get_all_mpa()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(mpa, vec!["G", "PG", "PG-13", "R", "NC-17"]);

        let genres = service.get_all_genres().unwrap();
        assert_eq!(genres.len(), 6);
        assert_eq!(genres[0], Genre::new(1, "Comedy"));
        assert_eq!(service.get_genre(6).unwrap().name, "Action");
        assert_eq!(service.get_mpa(3).unwrap().name, "PG-13");
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let mut genres = MockGenreRepository::new();
        genres.expect_get_by_id().returning(|_| Ok(None));
        let mut mpa = MockMpaRepository::new();
        mpa.expect_get_by_id().returning(|_| Ok(None));

        let service = CatalogService::new(Arc::new(genres), Arc::new(mpa));

        let err = service.get_genre(42).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("42"));
        assert!(service.get_mpa(9999).unwrap_err().is_not_found());
    }
}
