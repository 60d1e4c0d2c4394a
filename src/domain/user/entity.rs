use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by storage on creation
    pub id: i64,
    pub email: String,
    pub login: String,
    /// Display name, never blank once stored
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

/// User fields without identity, as written through a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

/// Registration data
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Partial update: `None` or blank strings leave the stored value in place
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub id: i64,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl NewUser {
    pub fn new(email: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            login: login.into(),
            name: None,
            birthday: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Builds the record to store, defaulting a blank or missing name to the login
    pub fn into_record(self) -> UserRecord {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.login.clone(),
        };
        UserRecord {
            email: self.email,
            login: self.login,
            name,
            birthday: self.birthday,
        }
    }
}

impl UserPatch {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl User {
    pub fn from_record(id: i64, record: UserRecord) -> Self {
        Self {
            id,
            email: record.email,
            login: record.login,
            name: record.name,
            birthday: record.birthday,
        }
    }

    /// Computes the replacement snapshot for a partial update.
    ///
    /// A blank incoming name resets the name to the login stored *before*
    /// this merge, not to a login supplied in the same patch.
    pub fn merged_with(&self, patch: &UserPatch) -> UserRecord {
        let email = non_blank(&patch.email).unwrap_or(&self.email).to_string();
        let login = non_blank(&patch.login).unwrap_or(&self.login).to_string();
        let name = match &patch.name {
            Some(name) if name.trim().is_empty() => self.login.clone(),
            Some(name) => name.clone(),
            None => self.name.clone(),
        };
        UserRecord {
            email,
            login,
            name,
            birthday: patch.birthday.or(self.birthday),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> User {
        User {
            id: 1,
            email: "old@example.com".to_string(),
            login: "oldlogin".to_string(),
            name: "Old Name".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
        }
    }

    #[test]
    fn test_blank_name_defaults_to_login() {
        let record = NewUser::new("user@example.com", "cooluser")
            .with_name("  ")
            .into_record();
        assert_eq!(record.name, "cooluser");

        let record = NewUser::new("user@example.com", "cooluser").into_record();
        assert_eq!(record.name, "cooluser");
    }

    #[test]
    fn test_email_only_patch_keeps_other_fields() {
        let mut patch = UserPatch::new(1);
        patch.email = Some("new@example.com".to_string());

        let merged = stored().merged_with(&patch);
        assert_eq!(merged.email, "new@example.com");
        assert_eq!(merged.login, "oldlogin");
        assert_eq!(merged.name, "Old Name");
        assert_eq!(merged.birthday, NaiveDate::from_ymd_opt(1990, 1, 1));
    }

    #[test]
    fn test_blank_strings_do_not_overwrite() {
        let mut patch = UserPatch::new(1);
        patch.email = Some(" ".to_string());
        patch.login = Some(String::new());

        let merged = stored().merged_with(&patch);
        assert_eq!(merged.email, "old@example.com");
        assert_eq!(merged.login, "oldlogin");
    }

    #[test]
    fn test_blank_name_resets_to_stored_login() {
        let mut patch = UserPatch::new(1);
        patch.login = Some("newlogin".to_string());
        patch.name = Some("".to_string());

        let merged = stored().merged_with(&patch);
        assert_eq!(merged.login, "newlogin");
        assert_eq!(merged.name, "oldlogin");
    }

    #[test]
    fn test_merge_leaves_source_snapshot_untouched() {
        let user = stored();
        let mut patch = UserPatch::new(1);
        patch.name = Some("Renamed".to_string());

        let merged = user.merged_with(&patch);
        assert_eq!(merged.name, "Renamed");
        assert_eq!(user.name, "Old Name");
    }
}
