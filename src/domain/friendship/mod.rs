//! Friendship Invariants:
//!
//! 1. An edge is keyed by the ordered pair (user, friend), no own identity
//! 2. A user is never their own friend
//! 3. CONFIRMED edges come in pairs; UNCONFIRMED edges stand alone
//! 4. Removing a friendship is idempotent

pub mod entity;
pub mod transitions;

pub use entity::{EdgeChange, FriendshipAction, FriendshipStatus, FriendshipTransition};
pub use transitions::{plan_removal, plan_request};
