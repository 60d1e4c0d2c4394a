// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod handlers;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Film
    FilmCreated,
    FilmUpdated,
    // Friendship
    FriendRemoved,
    FriendRequested,
    FriendshipConfirmed,
    // Likes
    LikeAdded,
    LikeRemoved,
    // User
    UserCreated,
    UserUpdated,
};

pub use bus::{EventBus, EventLogEntry, DEFAULT_EVENT_LOG_CAPACITY};

pub use handlers::register_audit_handlers;
