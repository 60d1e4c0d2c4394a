// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::events::{register_audit_handlers, EventBus};
use crate::repositories::{
    SqliteFilmRepository, SqliteFriendshipRepository, SqliteGenreRepository,
    SqliteLikeRepository, SqliteMpaRepository, SqliteUserRepository,
};
use crate::services::{
    CatalogService, FilmService, FriendshipService, LikeService, UserService,
};

/// Application state shared by every transport.
/// All fields are Arc-wrapped for thread-safe sharing across requests.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub catalog_service: Arc<CatalogService>,
    pub film_service: Arc<FilmService>,
    pub user_service: Arc<UserService>,
    pub friendship_service: Arc<FriendshipService>,
    pub like_service: Arc<LikeService>,
}

impl AppState {
    /// Wires the SQLite repositories and services over one pool.
    /// The schema must already be initialized.
    pub fn from_pool(pool: Arc<ConnectionPool>) -> Self {
        let event_bus = Arc::new(EventBus::new());
        register_audit_handlers(&event_bus);

        let film_repo = Arc::new(SqliteFilmRepository::new(pool.clone()));
        let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
        let genre_repo = Arc::new(SqliteGenreRepository::new(pool.clone()));
        let mpa_repo = Arc::new(SqliteMpaRepository::new(pool.clone()));
        let friendship_repo = Arc::new(SqliteFriendshipRepository::new(pool.clone()));
        let like_repo = Arc::new(SqliteLikeRepository::new(pool));

        let catalog_service = Arc::new(CatalogService::new(genre_repo.clone(), mpa_repo.clone()));
        let film_service = Arc::new(FilmService::new(
            film_repo.clone(),
            mpa_repo,
            genre_repo,
            event_bus.clone(),
        ));
        let user_service = Arc::new(UserService::new(user_repo.clone(), event_bus.clone()));
        let friendship_service = Arc::new(FriendshipService::new(
            friendship_repo,
            user_repo.clone(),
            event_bus.clone(),
        ));
        let like_service = Arc::new(LikeService::new(
            like_repo,
            film_repo,
            user_repo,
            event_bus.clone(),
        ));

        Self {
            event_bus,
            catalog_service,
            film_service,
            user_service,
            friendship_service,
            like_service,
        }
    }
}
