use chrono::{NaiveDate, Utc};

use super::entity::UserRecord;
use crate::domain::{DomainError, DomainResult};

/// Validates all User invariants against today's date (UTC)
pub fn validate_user(user: &UserRecord) -> DomainResult<()> {
    validate_user_on(user, Utc::now().date_naive())
}

pub(crate) fn validate_user_on(user: &UserRecord, today: NaiveDate) -> DomainResult<()> {
    validate_email(&user.email)?;
    validate_login(&user.login)?;
    validate_birthday(user.birthday, today)?;
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(DomainError::InvariantViolation(format!(
            "Email '{}' must be non-empty and contain '@'",
            email
        )));
    }
    Ok(())
}

fn validate_login(login: &str) -> DomainResult<()> {
    if login.is_empty() || login.chars().any(char::is_whitespace) {
        return Err(DomainError::InvariantViolation(
            "Login cannot be empty or contain whitespace".to_string(),
        ));
    }
    Ok(())
}

fn validate_birthday(birthday: Option<NaiveDate>, today: NaiveDate) -> DomainResult<()> {
    if let Some(date) = birthday {
        if date > today {
            return Err(DomainError::InvariantViolation(format!(
                "Birthday {} cannot be in the future",
                date
            )));
        }
    }
    Ok(())
}
