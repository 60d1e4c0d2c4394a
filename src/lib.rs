// src/lib.rs
// Filmorate - film catalog and social graph core
//
// Architecture:
// - Domain-centric: validation rules and state machines live in `domain`
// - Repositories are dumb mappers over SQLite
// - Services orchestrate: validate, check references, write once, emit an event
// - Explicit: no implicit behavior, no magic

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    DomainError,
    // Film
    Film,
    FilmDraft,
    // Friendship
    FriendshipStatus,
    // Reference data
    Genre,
    Mpa,
    // User
    NewUser,
    User,
    UserPatch,
    DEFAULT_POPULAR_COUNT,
};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult, ErrorKind};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{DomainEvent, EventBus, EventLogEntry};

// ============================================================================
// PUBLIC API - Database & Config
// ============================================================================

pub use config::DatabaseConfig;
pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{CatalogService, FilmService, FriendshipService, LikeService, UserService};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse};
