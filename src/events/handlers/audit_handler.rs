// src/events/handlers/audit_handler.rs
//
// Audit trail for catalog and social-graph changes.
//
// Subscribes to every mutation event and writes one info line per fact.
// Does not contain business logic.

use crate::events::types::{
    FilmCreated, FilmUpdated, FriendRemoved, FriendRequested, FriendshipConfirmed, LikeAdded,
    LikeRemoved, UserCreated, UserUpdated,
};
use crate::events::EventBus;

/// Registers the audit handlers with the event bus.
pub fn register_audit_handlers(bus: &EventBus) {
    bus.subscribe::<FilmCreated, _>(|event| {
        log::info!("[AUDIT] film {} created: '{}'", event.film_id, event.name);
    });
    bus.subscribe::<FilmUpdated, _>(|event| {
        log::info!(
            "[AUDIT] film {} updated ({} genres)",
            event.film_id,
            event.genre_count
        );
    });
    bus.subscribe::<UserCreated, _>(|event| {
        log::info!("[AUDIT] user {} created: '{}'", event.user_id, event.login);
    });
    bus.subscribe::<UserUpdated, _>(|event| {
        log::info!("[AUDIT] user {} updated", event.user_id);
    });
    bus.subscribe::<FriendRequested, _>(|event| {
        log::info!(
            "[AUDIT] user {} sent a friend request to {}",
            event.user_id,
            event.friend_id
        );
    });
    bus.subscribe::<FriendshipConfirmed, _>(|event| {
        log::info!(
            "[AUDIT] users {} and {} are now friends",
            event.user_id,
            event.friend_id
        );
    });
    bus.subscribe::<FriendRemoved, _>(|event| {
        log::info!(
            "[AUDIT] user {} removed {} (reverse downgraded: {})",
            event.user_id,
            event.friend_id,
            event.reverse_downgraded
        );
    });
    bus.subscribe::<LikeAdded, _>(|event| {
        log::info!("[AUDIT] user {} liked film {}", event.user_id, event.film_id);
    });
    bus.subscribe::<LikeRemoved, _>(|event| {
        log::info!("[AUDIT] user {} unliked film {}", event.user_id, event.film_id);
    });

    log::debug!("[AUDIT] Handlers registered");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_one_handler_per_event() {
        let bus = EventBus::new();
        register_audit_handlers(&bus);

        assert_eq!(bus.subscriber_count::<FilmCreated>(), 1);
        assert_eq!(bus.subscriber_count::<FriendshipConfirmed>(), 1);
        assert_eq!(bus.subscriber_count::<LikeRemoved>(), 1);

        bus.emit(LikeAdded::new(1, 2));
        assert_eq!(bus.get_event_log()[0].handler_count, 1);
    }
}
