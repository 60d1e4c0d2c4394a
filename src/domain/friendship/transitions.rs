// src/domain/friendship/transitions.rs
//
// Friendship state machine, per ordered pair (user -> friend):
//
//   NONE --request--> UNCONFIRMED
//   UNCONFIRMED (friend -> user) --request from user--> CONFIRMED both ways
//   any --remove--> NONE, and a CONFIRMED reverse edge falls back to UNCONFIRMED
//
// Edges are stored one direction at a time. A request never creates the
// reverse edge, so "friends of A" and "friends of B" are independent views
// until both sides have asked.

use super::entity::{EdgeChange, FriendshipAction, FriendshipStatus};
use crate::domain::{DomainError, DomainResult};

/// Plans the edge writes for `user_id` asking `friend_id` to be friends.
///
/// `forward` is the current user -> friend edge, `reverse` the friend -> user edge.
/// An empty plan means the request changes nothing.
pub fn plan_request(
    user_id: i64,
    friend_id: i64,
    forward: Option<FriendshipStatus>,
    reverse: Option<FriendshipStatus>,
) -> DomainResult<Vec<EdgeChange>> {
    if user_id == friend_id {
        return Err(DomainError::InvariantViolation(format!(
            "User {} cannot befriend themselves",
            user_id
        )));
    }

    if forward.is_some() {
        return Ok(Vec::new());
    }

    let plan = match reverse {
        Some(FriendshipStatus::Unconfirmed) => vec![
            EdgeChange::Upsert {
                user_id,
                friend_id,
                status: FriendshipStatus::Confirmed,
            },
            EdgeChange::Upsert {
                user_id: friend_id,
                friend_id: user_id,
                status: FriendshipStatus::Confirmed,
            },
        ],
        // Reverse side already confirmed but ours is gone: restore it
        Some(FriendshipStatus::Confirmed) => vec![EdgeChange::Upsert {
            user_id,
            friend_id,
            status: FriendshipStatus::Confirmed,
        }],
        None => vec![EdgeChange::Upsert {
            user_id,
            friend_id,
            status: FriendshipStatus::Unconfirmed,
        }],
    };
    Ok(plan)
}

/// Plans the edge writes for `user_id` dropping `friend_id`.
/// Never fails: removing a missing edge is a no-op.
pub fn plan_removal(
    user_id: i64,
    friend_id: i64,
    forward: Option<FriendshipStatus>,
    reverse: Option<FriendshipStatus>,
) -> Vec<EdgeChange> {
    let mut plan = Vec::new();
    if forward.is_some() {
        plan.push(EdgeChange::Remove { user_id, friend_id });
    }
    if reverse == Some(FriendshipStatus::Confirmed) {
        plan.push(EdgeChange::Upsert {
            user_id: friend_id,
            friend_id: user_id,
            status: FriendshipStatus::Unconfirmed,
        });
    }
    plan
}

impl FriendshipAction {
    /// Plans this action against the current edge statuses of its pair
    pub fn plan(
        &self,
        forward: Option<FriendshipStatus>,
        reverse: Option<FriendshipStatus>,
    ) -> DomainResult<Vec<EdgeChange>> {
        match *self {
            FriendshipAction::Request { user_id, friend_id } => {
                plan_request(user_id, friend_id, forward, reverse)
            }
            FriendshipAction::Remove { user_id, friend_id } => {
                Ok(plan_removal(user_id, friend_id, forward, reverse))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FriendshipStatus::*;

    #[test]
    fn test_first_request_is_unconfirmed_one_way() {
        let plan = plan_request(1, 2, None, None).unwrap();
        assert_eq!(
            plan,
            vec![EdgeChange::Upsert {
                user_id: 1,
                friend_id: 2,
                status: Unconfirmed
            }]
        );
    }

    #[test]
    fn test_reciprocal_request_confirms_both_sides() {
        let plan = plan_request(2, 1, None, Some(Unconfirmed)).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.contains(&EdgeChange::Upsert {
            user_id: 2,
            friend_id: 1,
            status: Confirmed
        }));
        assert!(plan.contains(&EdgeChange::Upsert {
            user_id: 1,
            friend_id: 2,
            status: Confirmed
        }));
    }

    #[test]
    fn test_repeated_request_changes_nothing() {
        assert!(plan_request(1, 2, Some(Unconfirmed), None).unwrap().is_empty());
        assert!(plan_request(1, 2, Some(Confirmed), Some(Confirmed))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_self_request_fails() {
        assert!(matches!(
            plan_request(3, 3, None, None),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_removal_of_missing_edge_is_empty() {
        assert!(plan_removal(1, 2, None, None).is_empty());
    }

    #[test]
    fn test_removal_downgrades_confirmed_reverse_edge() {
        let plan = plan_removal(1, 2, Some(Confirmed), Some(Confirmed));
        assert_eq!(
            plan,
            vec![
                EdgeChange::Remove {
                    user_id: 1,
                    friend_id: 2
                },
                EdgeChange::Upsert {
                    user_id: 2,
                    friend_id: 1,
                    status: Unconfirmed
                },
            ]
        );
    }

    #[test]
    fn test_removal_keeps_unconfirmed_reverse_edge() {
        let plan = plan_removal(1, 2, None, Some(Unconfirmed));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_action_dispatches_to_planner() {
        let request = FriendshipAction::Request {
            user_id: 1,
            friend_id: 2,
        };
        assert_eq!(request.pair(), (1, 2));
        assert_eq!(
            request.plan(None, Some(Unconfirmed)).unwrap(),
            plan_request(1, 2, None, Some(Unconfirmed)).unwrap()
        );

        let remove = FriendshipAction::Remove {
            user_id: 1,
            friend_id: 2,
        };
        assert_eq!(
            remove.plan(Some(Confirmed), Some(Confirmed)).unwrap(),
            plan_removal(1, 2, Some(Confirmed), Some(Confirmed))
        );
    }
}
