use serde::{Deserialize, Serialize};

/// Status of a stored friendship edge (user -> friend)
/// A missing edge is the NONE state and is represented as `Option::None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    /// The user asked, the friend has not asked back
    Unconfirmed,
    /// Both sides asked
    Confirmed,
}

/// A single write against the friendship edge table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    Upsert {
        user_id: i64,
        friend_id: i64,
        status: FriendshipStatus,
    },
    Remove {
        user_id: i64,
        friend_id: i64,
    },
}

/// A request to change the edges between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendshipAction {
    Request { user_id: i64, friend_id: i64 },
    Remove { user_id: i64, friend_id: i64 },
}

/// What an action found and what it wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendshipTransition {
    /// Status of user -> friend before the action
    pub forward: Option<FriendshipStatus>,
    /// Status of friend -> user before the action
    pub reverse: Option<FriendshipStatus>,
    pub changes: Vec<EdgeChange>,
}

impl FriendshipAction {
    /// (user_id, friend_id) of the acting side
    pub fn pair(&self) -> (i64, i64) {
        match *self {
            FriendshipAction::Request { user_id, friend_id }
            | FriendshipAction::Remove { user_id, friend_id } => (user_id, friend_id),
        }
    }
}

impl FriendshipTransition {
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }

    /// True when the action wrote a CONFIRMED edge
    pub fn confirms(&self) -> bool {
        self.changes.iter().any(|change| {
            matches!(
                change,
                EdgeChange::Upsert {
                    status: FriendshipStatus::Confirmed,
                    ..
                }
            )
        })
    }
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Unconfirmed => "UNCONFIRMED",
            FriendshipStatus::Confirmed => "CONFIRMED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "UNCONFIRMED" => Some(FriendshipStatus::Unconfirmed),
            "CONFIRMED" => Some(FriendshipStatus::Confirmed),
            _ => None,
        }
    }
}

impl std::fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
