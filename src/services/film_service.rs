// src/services/film_service.rs
//
// Film orchestration: local rules, reference checks, one write, one event

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{validate_film_draft, DomainError, Film, FilmDraft, FilmRecord};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FilmCreated, FilmUpdated};
use crate::repositories::{FilmRepository, GenreRepository, MpaRepository};

pub struct FilmService {
    film_repo: Arc<dyn FilmRepository>,
    mpa_repo: Arc<dyn MpaRepository>,
    genre_repo: Arc<dyn GenreRepository>,
    event_bus: Arc<EventBus>,
}

impl FilmService {
    pub fn new(
        film_repo: Arc<dyn FilmRepository>,
        mpa_repo: Arc<dyn MpaRepository>,
        genre_repo: Arc<dyn GenreRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            film_repo,
            mpa_repo,
            genre_repo,
            event_bus,
        }
    }

    pub fn create_film(&self, draft: FilmDraft) -> AppResult<Film> {
        let record = self.prepare(&draft)?;

        let film_id = self.film_repo.insert(&record)?;
        let film = self.load(film_id)?;

        log::debug!("Created film {} '{}'", film.id, film.name);
        self.event_bus
            .emit(FilmCreated::new(film.id, film.name.clone()));

        Ok(film)
    }

    /// Full replace: scalar fields and the genre set both come from `draft`
    pub fn update_film(&self, film_id: i64, draft: FilmDraft) -> AppResult<Film> {
        if !self.film_repo.exists(film_id)? {
            log::warn!("Update rejected: film {} does not exist", film_id);
            return Err(AppError::Domain(DomainError::not_found("Film", film_id)));
        }

        let record = self.prepare(&draft)?;
        self.film_repo.update(film_id, &record)?;
        let film = self.load(film_id)?;

        log::debug!("Updated film {}", film.id);
        self.event_bus
            .emit(FilmUpdated::new(film.id, film.genres.len()));

        Ok(film)
    }

    pub fn get_film(&self, film_id: i64) -> AppResult<Film> {
        self.load(film_id)
    }

    pub fn list_all_films(&self) -> AppResult<Vec<Film>> {
        self.film_repo.list_all()
    }

    fn load(&self, film_id: i64) -> AppResult<Film> {
        self.film_repo
            .get_by_id(film_id)?
            .ok_or(AppError::Domain(DomainError::not_found("Film", film_id)))
    }

    /// Local rules first, then the MPA lookup, then one batch genre lookup
    fn prepare(&self, draft: &FilmDraft) -> AppResult<FilmRecord> {
        let record = validate_film_draft(draft).map_err(|e| {
            log::warn!("Film rejected: {}", e);
            AppError::Domain(e)
        })?;

        if self.mpa_repo.get_by_id(record.mpa_id)?.is_none() {
            log::warn!("Film rejected: unknown MPA {}", record.mpa_id);
            return Err(AppError::Domain(DomainError::not_found("MPA", record.mpa_id)));
        }

        self.ensure_genres_exist(&record.genre_ids)?;
        Ok(record)
    }

    fn ensure_genres_exist(&self, genre_ids: &BTreeSet<i64>) -> AppResult<()> {
        if genre_ids.is_empty() {
            return Ok(());
        }

        let requested: Vec<i64> = genre_ids.iter().copied().collect();
        let found: BTreeSet<i64> = self
            .genre_repo
            .find_by_ids(&requested)?
            .into_iter()
            .map(|genre| genre.id)
            .collect();

        let missing: Vec<i64> = genre_ids.difference(&found).copied().collect();
        if !missing.is_empty() {
            log::warn!("Film rejected: unknown genres {:?}", missing);
            return Err(AppError::Domain(DomainError::MissingReferences {
                entity: "Genre",
                ids: missing,
            }));
        }
        Ok(())
    }
}
