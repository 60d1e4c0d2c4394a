// src/services/user_service.rs
use std::sync::Arc;

use crate::domain::{validate_user, DomainError, NewUser, User, UserPatch};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, UserCreated, UserUpdated};
use crate::repositories::UserRepository;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<EventBus>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            user_repo,
            event_bus,
        }
    }

    pub fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let record = new_user.into_record();
        validate_user(&record).map_err(|e| {
            log::warn!("User rejected: {}", e);
            AppError::Domain(e)
        })?;

        let user_id = self.user_repo.insert(&record)?;
        let user = self.load(user_id)?;

        log::debug!("Created user {} '{}'", user.id, user.login);
        self.event_bus
            .emit(UserCreated::new(user.id, user.login.clone()));

        Ok(user)
    }

    /// Merges `patch` over the stored user and replaces the stored snapshot
    pub fn update_user(&self, patch: UserPatch) -> AppResult<User> {
        let current = self.user_repo.get_by_id(patch.id)?.ok_or_else(|| {
            log::warn!("Update rejected: user {} does not exist", patch.id);
            AppError::Domain(DomainError::not_found("User", patch.id))
        })?;

        let merged = current.merged_with(&patch);
        validate_user(&merged).map_err(|e| {
            log::warn!("User {} update rejected: {}", patch.id, e);
            AppError::Domain(e)
        })?;

        self.user_repo.update(current.id, &merged)?;
        let user = self.load(current.id)?;

        log::debug!("Updated user {}", user.id);
        self.event_bus.emit(UserUpdated::new(user.id));

        Ok(user)
    }

    pub fn get_user(&self, user_id: i64) -> AppResult<User> {
        self.load(user_id)
    }

    pub fn list_all_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.list_all()
    }

    fn load(&self, user_id: i64) -> AppResult<User> {
        self.user_repo
            .get_by_id(user_id)?
            .ok_or(AppError::Domain(DomainError::not_found("User", user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::repositories::{MockUserRepository, SqliteUserRepository};
    use chrono::{Duration, NaiveDate, Utc};

    fn sqlite_service() -> (UserService, Arc<EventBus>, tempfile::TempDir) {
        let (pool, dir) = create_test_pool().unwrap();
        let bus = Arc::new(EventBus::new());
        let service = UserService::new(Arc::new(SqliteUserRepository::new(pool)), bus.clone());
        (service, bus, dir)
    }

    fn birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
    }

    #[test]
    fn test_blank_name_becomes_login() {
        let (service, bus, _dir) = sqlite_service();

        let user = service
            .create_user(
                NewUser::new("user@example.com", "cooluser")
                    .with_name("")
                    .with_birthday(birthday()),
            )
            .unwrap();

        assert!(user.id > 0);
        assert_eq!(user.name, "cooluser");
        assert_eq!(service.get_user(user.id).unwrap(), user);
        assert_eq!(bus.get_event_log()[0].event_type, "UserCreated");
    }

    #[test]
    fn test_create_rejects_invalid_users() {
        let (service, _bus, _dir) = sqlite_service();

        let blank_login = NewUser::new("user@example.com", "  ");
        assert!(service.create_user(blank_login).unwrap_err().is_validation());

        let spaced_login = NewUser::new("user@example.com", "cool user");
        assert!(service.create_user(spaced_login).unwrap_err().is_validation());

        let bad_email = NewUser::new("user.example.com", "cooluser");
        assert!(service.create_user(bad_email).unwrap_err().is_validation());

        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        let unborn = NewUser::new("user@example.com", "cooluser").with_birthday(tomorrow);
        assert!(service.create_user(unborn).unwrap_err().is_validation());

        assert!(service.list_all_users().unwrap().is_empty());
    }

    #[test]
    fn test_email_only_update_keeps_other_fields() {
        let (service, _bus, _dir) = sqlite_service();
        let user = service
            .create_user(
                NewUser::new("old@example.com", "oldlogin")
                    .with_name("Old Name")
                    .with_birthday(birthday()),
            )
            .unwrap();

        let mut patch = UserPatch::new(user.id);
        patch.email = Some("new@example.com".to_string());
        let updated = service.update_user(patch).unwrap();

        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.login, "oldlogin");
        assert_eq!(updated.name, "Old Name");
        assert_eq!(updated.birthday, Some(birthday()));
    }

    #[test]
    fn test_blank_name_update_resets_to_stored_login() {
        let (service, bus, _dir) = sqlite_service();
        let user = service
            .create_user(NewUser::new("old@example.com", "oldlogin").with_name("Old Name"))
            .unwrap();

        let mut patch = UserPatch::new(user.id);
        patch.login = Some("newlogin".to_string());
        patch.name = Some(" ".to_string());
        let updated = service.update_user(patch).unwrap();

        assert_eq!(updated.login, "newlogin");
        assert_eq!(updated.name, "oldlogin");
        assert_eq!(bus.get_event_log()[1].event_type, "UserUpdated");
    }

    #[test]
    fn test_update_validates_merged_user() {
        let (service, _bus, _dir) = sqlite_service();
        let user = service
            .create_user(NewUser::new("old@example.com", "oldlogin"))
            .unwrap();

        let mut patch = UserPatch::new(user.id);
        patch.email = Some("no-at-sign".to_string());
        assert!(service.update_user(patch).unwrap_err().is_validation());
        assert_eq!(service.get_user(user.id).unwrap().email, "old@example.com");
    }

    #[test]
    fn test_update_unknown_user_writes_nothing() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(|_| Ok(None));
        users.expect_update().never();

        let service = UserService::new(Arc::new(users), Arc::new(EventBus::new()));

        let err = service.update_user(UserPatch::new(404)).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("404"));
    }
}
