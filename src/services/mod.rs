// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Each service validates, calls its repositories, and emits one event per
// successful mutation.

pub mod catalog_service;
pub mod film_service;
pub mod friendship_service;
pub mod like_service;
pub mod user_service;

pub use catalog_service::CatalogService;
pub use film_service::FilmService;
pub use friendship_service::FriendshipService;
pub use like_service::LikeService;
pub use user_service::UserService;
