// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod film;
pub mod friendship;
pub mod popularity;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Reference data
pub use catalog::{Genre, Mpa};

// Film Domain
pub use film::{
    validate_film_draft, Film, FilmDraft, FilmRecord, MAX_DESCRIPTION_LENGTH, MIN_RELEASE_DATE,
};

// User Domain
pub use user::{validate_user, NewUser, User, UserPatch, UserRecord};

// Popularity (derived, never stored)
pub use popularity::{rank_by_likes, validate_popular_count, DEFAULT_POPULAR_COUNT};

// Friendship Domain
pub use friendship::{
    plan_removal, plan_request, EdgeChange, FriendshipAction, FriendshipStatus, FriendshipTransition,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// The two failure kinds callers are allowed to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data violates an invariant
    Validation,
    /// A referenced entity or relation does not exist
    NotFound,
}

/// Domain-level errors
/// These represent violations of business rules and broken references
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("{entity} with id = {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{entity} not found for ids {ids:?}")]
    MissingReferences { entity: &'static str, ids: Vec<i64> },

    #[error("Relation not found: {0}")]
    RelationNotFound(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvariantViolation(_) | DomainError::AlreadyExists(_) => {
                ErrorKind::Validation
            }
            DomainError::NotFound { .. }
            | DomainError::MissingReferences { .. }
            | DomainError::RelationNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
