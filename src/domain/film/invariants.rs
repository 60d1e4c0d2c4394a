use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::entity::{FilmDraft, FilmRecord};
use crate::domain::{DomainError, DomainResult};

/// First public film screening; nothing may be released earlier
pub const MIN_RELEASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(date) => date,
    None => panic!("invalid cinema epoch"),
};

pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Validates every rule that needs no storage access and prepares the record.
/// Reference existence (MPA, genres) is checked afterwards by the film service.
pub fn validate_film_draft(draft: &FilmDraft) -> DomainResult<FilmRecord> {
    validate_name(&draft.name)?;
    let description = validate_description(draft.description.as_deref())?;
    let release_date = validate_release_date(draft.release_date)?;
    let duration = validate_duration(draft.duration)?;
    let mpa_id = validate_mpa_id(draft.mpa_id)?;
    let genre_ids = collect_genre_ids(&draft.genre_ids)?;

    Ok(FilmRecord {
        name: draft.name.clone(),
        description,
        release_date,
        duration,
        mpa_id,
        genre_ids,
    })
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Film name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> DomainResult<String> {
    let description = description.unwrap_or_default();
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::InvariantViolation(format!(
            "Film description is {} characters, maximum is {}",
            length, MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(description.to_string())
}

/// Inclusive bound: a film released on the epoch itself is valid
fn validate_release_date(release_date: Option<NaiveDate>) -> DomainResult<NaiveDate> {
    match release_date {
        None => Err(DomainError::InvariantViolation(
            "Film release date is required".to_string(),
        )),
        Some(date) if date < MIN_RELEASE_DATE => Err(DomainError::InvariantViolation(format!(
            "Release date {} is earlier than {}",
            date, MIN_RELEASE_DATE
        ))),
        Some(date) => Ok(date),
    }
}

fn validate_duration(duration: i32) -> DomainResult<u32> {
    if duration <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Film duration must be positive, got {}",
            duration
        )));
    }
    Ok(duration as u32)
}

fn validate_mpa_id(mpa_id: Option<i64>) -> DomainResult<i64> {
    match mpa_id {
        None => Err(DomainError::InvariantViolation(
            "Film MPA rating is required".to_string(),
        )),
        Some(id) if id <= 0 => Err(DomainError::InvariantViolation(format!(
            "MPA id must be positive, got {}",
            id
        ))),
        Some(id) => Ok(id),
    }
}

/// Duplicates collapse; the set keeps ascending id order
fn collect_genre_ids(genre_ids: &[i64]) -> DomainResult<BTreeSet<i64>> {
    if let Some(bad) = genre_ids.iter().find(|id| **id <= 0) {
        return Err(DomainError::InvariantViolation(format!(
            "Genre id must be positive, got {}",
            bad
        )));
    }
    Ok(genre_ids.iter().copied().collect())
}

/// Invariants that must hold true for the Film domain:
///
/// 1. Name is not blank
/// 2. Description has at most 200 characters
/// 3. Release date exists and is on or after 1895-12-28
/// 4. Duration is positive
/// 5. Exactly one MPA rating, positive id, resolvable in the catalog
/// 6. Genres are unique by id, positive, resolvable in the catalog
