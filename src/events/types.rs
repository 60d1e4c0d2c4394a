// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

// ============================================================================
// FILM EVENTS
// ============================================================================

/// Emitted after a film and its genre links are stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub film_id: i64,
    pub name: String,
}

impl FilmCreated {
    pub fn new(film_id: i64, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            film_id,
            name,
        }
    }
}

impl_domain_event!(FilmCreated);

/// Emitted after a film's fields and genre set are replaced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub film_id: i64,
    pub genre_count: usize,
}

impl FilmUpdated {
    pub fn new(film_id: i64, genre_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            film_id,
            genre_count,
        }
    }
}

impl_domain_event!(FilmUpdated);

// ============================================================================
// USER EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: i64,
    pub login: String,
}

impl UserCreated {
    pub fn new(user_id: i64, login: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            login,
        }
    }
}

impl_domain_event!(UserCreated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: i64,
}

impl UserUpdated {
    pub fn new(user_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }
}

impl_domain_event!(UserUpdated);

// ============================================================================
// FRIENDSHIP EVENTS
// ============================================================================

/// Emitted when a one-sided request is recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: i64,
    pub friend_id: i64,
}

impl FriendRequested {
    pub fn new(user_id: i64, friend_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            friend_id,
        }
    }
}

impl_domain_event!(FriendRequested);

/// Emitted when a request meets a pending request from the other side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendshipConfirmed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: i64,
    pub friend_id: i64,
}

impl FriendshipConfirmed {
    pub fn new(user_id: i64, friend_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            friend_id,
        }
    }
}

impl_domain_event!(FriendshipConfirmed);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: i64,
    pub friend_id: i64,
    /// Whether the reverse edge was downgraded back to unconfirmed
    pub reverse_downgraded: bool,
}

impl FriendRemoved {
    pub fn new(user_id: i64, friend_id: i64, reverse_downgraded: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            friend_id,
            reverse_downgraded,
        }
    }
}

impl_domain_event!(FriendRemoved);

// ============================================================================
// LIKE EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub film_id: i64,
    pub user_id: i64,
}

impl LikeAdded {
    pub fn new(film_id: i64, user_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            film_id,
            user_id,
        }
    }
}

impl_domain_event!(LikeAdded);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub film_id: i64,
    pub user_id: i64,
}

impl LikeRemoved {
    pub fn new(film_id: i64, user_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            film_id,
            user_id,
        }
    }
}

impl_domain_event!(LikeRemoved);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(FilmCreated::new(1, "x".into()).event_type(), "FilmCreated");
        assert_eq!(FriendshipConfirmed::new(1, 2).event_type(), "FriendshipConfirmed");
        assert_eq!(LikeRemoved::new(1, 2).event_type(), "LikeRemoved");
    }

    #[test]
    fn test_each_event_gets_its_own_id() {
        let a = UserUpdated::new(7);
        let b = UserUpdated::new(7);
        assert_ne!(a.event_id(), b.event_id());
    }

    #[test]
    fn test_serializes_payload() {
        let event = FriendRemoved::new(1, 2, true);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["friend_id"], 2);
        assert_eq!(json["reverse_downgraded"], true);
    }
}
