// src/services/friendship_service.rs
//
// Friend requests, confirmation and removal between existing users.
// Transitions are planned by `domain::friendship` and applied atomically
// by the repository; this service checks the users and reports facts.

use std::sync::Arc;

use crate::domain::{DomainError, FriendshipAction, FriendshipStatus, User};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FriendRemoved, FriendRequested, FriendshipConfirmed};
use crate::repositories::{FriendshipRepository, UserRepository};

pub struct FriendshipService {
    friendship_repo: Arc<dyn FriendshipRepository>,
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<EventBus>,
}

impl FriendshipService {
    pub fn new(
        friendship_repo: Arc<dyn FriendshipRepository>,
        user_repo: Arc<dyn UserRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            friendship_repo,
            user_repo,
            event_bus,
        }
    }

    /// `user_id` asks `friend_id` to be friends.
    /// Repeating a request changes nothing; answering a pending request
    /// from `friend_id` confirms both directions.
    pub fn add_friend(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        self.ensure_user_exists(user_id)?;
        self.ensure_user_exists(friend_id)?;

        let transition = self
            .friendship_repo
            .transition(FriendshipAction::Request { user_id, friend_id })
            .map_err(|e| {
                if e.is_validation() {
                    log::warn!("Friend request rejected: {}", e);
                }
                e
            })?;

        if transition.is_noop() {
            log::debug!("User {} already asked {}", user_id, friend_id);
        } else if transition.confirms() {
            log::debug!("Users {} and {} confirmed friendship", user_id, friend_id);
            self.event_bus
                .emit(FriendshipConfirmed::new(user_id, friend_id));
        } else {
            log::debug!("User {} sent a friend request to {}", user_id, friend_id);
            self.event_bus.emit(FriendRequested::new(user_id, friend_id));
        }

        Ok(())
    }

    /// Idempotent: removing a friend that was never added succeeds
    pub fn remove_friend(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        self.ensure_user_exists(user_id)?;
        self.ensure_user_exists(friend_id)?;

        let transition = self
            .friendship_repo
            .transition(FriendshipAction::Remove { user_id, friend_id })?;

        if transition.is_noop() {
            return Ok(());
        }

        let reverse_downgraded = transition.reverse == Some(FriendshipStatus::Confirmed);
        log::debug!(
            "User {} removed friend {} (reverse downgraded: {})",
            user_id,
            friend_id,
            reverse_downgraded
        );
        self.event_bus
            .emit(FriendRemoved::new(user_id, friend_id, reverse_downgraded));

        Ok(())
    }

    /// Everyone `user_id` has an edge to, in any status, ordered by id
    pub fn get_friends(&self, user_id: i64) -> AppResult<Vec<User>> {
        self.ensure_user_exists(user_id)?;

        let ids = self.friendship_repo.list_friend_ids(user_id)?;
        self.user_repo.find_by_ids(&ids)
    }

    pub fn get_common_friends(&self, user_id: i64, other_id: i64) -> AppResult<Vec<User>> {
        self.ensure_user_exists(user_id)?;
        self.ensure_user_exists(other_id)?;

        let ids = self
            .friendship_repo
            .list_common_friend_ids(user_id, other_id)?;
        self.user_repo.find_by_ids(&ids)
    }

    /// `None` means there is no `user_id -> friend_id` edge
    pub fn get_friendship_status(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> AppResult<Option<FriendshipStatus>> {
        self.ensure_user_exists(user_id)?;
        self.ensure_user_exists(friend_id)?;

        self.friendship_repo.get_status(user_id, friend_id)
    }

    fn ensure_user_exists(&self, user_id: i64) -> AppResult<()> {
        if !self.user_repo.exists(user_id)? {
            log::warn!("User {} does not exist", user_id);
            return Err(AppError::Domain(DomainError::not_found("User", user_id)));
        }
        Ok(())
    }
}
