// src/services/like_service.rs
//
// Likes and the popularity view derived from them.
// Unlike friendship removal, removing a like that does not exist is an error.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{rank_by_likes, validate_popular_count, DomainError, Film};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, LikeAdded, LikeRemoved};
use crate::repositories::{FilmRepository, LikeRepository, UserRepository};

pub struct LikeService {
    like_repo: Arc<dyn LikeRepository>,
    film_repo: Arc<dyn FilmRepository>,
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<EventBus>,
}

impl LikeService {
    pub fn new(
        like_repo: Arc<dyn LikeRepository>,
        film_repo: Arc<dyn FilmRepository>,
        user_repo: Arc<dyn UserRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            like_repo,
            film_repo,
            user_repo,
            event_bus,
        }
    }

    pub fn add_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        self.ensure_participants_exist(film_id, user_id)?;

        if !self.like_repo.add(film_id, user_id)? {
            log::warn!("User {} already liked film {}", user_id, film_id);
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "User {} already liked film {}",
                user_id, film_id
            ))));
        }

        log::debug!("User {} liked film {}", user_id, film_id);
        self.event_bus.emit(LikeAdded::new(film_id, user_id));
        Ok(())
    }

    pub fn remove_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        self.ensure_participants_exist(film_id, user_id)?;

        if !self.like_repo.remove(film_id, user_id)? {
            log::warn!("User {} has no like on film {}", user_id, film_id);
            return Err(AppError::Domain(DomainError::RelationNotFound(format!(
                "User {} has not liked film {}",
                user_id, film_id
            ))));
        }

        log::debug!("User {} unliked film {}", user_id, film_id);
        self.event_bus.emit(LikeRemoved::new(film_id, user_id));
        Ok(())
    }

    /// Top `count` films by likes; films nobody liked still fill the tail
    pub fn get_popular(&self, count: i64) -> AppResult<Vec<Film>> {
        let limit = validate_popular_count(count).map_err(|e| {
            log::warn!("Popular films rejected: {}", e);
            AppError::Domain(e)
        })?;

        let counts: HashMap<i64, u64> = self.like_repo.like_counts()?.into_iter().collect();
        let films = self.film_repo.list_all()?;

        Ok(rank_by_likes(films, &counts, limit))
    }

    pub fn get_like_count(&self, film_id: i64) -> AppResult<u64> {
        self.ensure_film_exists(film_id)?;
        self.like_repo.count_for_film(film_id)
    }

    /// Film first, so a request naming two missing ids reports the film
    fn ensure_participants_exist(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        self.ensure_film_exists(film_id)?;

        if !self.user_repo.exists(user_id)? {
            log::warn!("User {} does not exist", user_id);
            return Err(AppError::Domain(DomainError::not_found("User", user_id)));
        }
        Ok(())
    }

    fn ensure_film_exists(&self, film_id: i64) -> AppResult<()> {
        if !self.film_repo.exists(film_id)? {
            log::warn!("Film {} does not exist", film_id);
            return Err(AppError::Domain(DomainError::not_found("Film", film_id)));
        }
        Ok(())
    }
}
