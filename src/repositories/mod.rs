// src/repositories/mod.rs
//
// Repository layer (the lookup gateway)
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement beyond what the schema checks
// - NO cross-repository calls
// - Multi-row writes run in one transaction
// - Friendship transitions are planned by `domain::friendship` inside that transaction
// - Explicit SQL only

pub mod film_repository;
pub mod friendship_repository;
pub mod genre_repository;
pub mod like_repository;
pub mod mpa_repository;
pub mod user_repository;

pub use film_repository::{FilmRepository, SqliteFilmRepository};
pub use friendship_repository::{FriendshipRepository, SqliteFriendshipRepository};
pub use genre_repository::{GenreRepository, SqliteGenreRepository};
pub use like_repository::{LikeRepository, SqliteLikeRepository};
pub use mpa_repository::{MpaRepository, SqliteMpaRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[cfg(test)]
pub use film_repository::MockFilmRepository;
#[cfg(test)]
pub use friendship_repository::MockFriendshipRepository;
#[cfg(test)]
pub use genre_repository::MockGenreRepository;
#[cfg(test)]
pub use like_repository::MockLikeRepository;
#[cfg(test)]
pub use mpa_repository::MockMpaRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

use chrono::NaiveDate;
use rusqlite::Row;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads an ISO-8601 date column
pub(crate) fn date_column(row: &Row, column: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(column)?;
    parse_date(&raw)
}

/// Reads a nullable ISO-8601 date column
pub(crate) fn optional_date_column(row: &Row, column: &str) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(column)?;
    raw.as_deref().map(parse_date).transpose()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid date '{}': {}", raw, e),
            )),
        )
    })
}

/// Ids bound per `IN (...)` query, well under SQLite's host parameter limit
pub(crate) const MAX_BATCH_PARAMS: usize = 500;

/// `?, ?, ?` with one placeholder per value
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_format_round_trip() {
        let date = NaiveDate::from_ymd_opt(1895, 12, 28).unwrap();
        assert_eq!(format_date(date), "1895-12-28");
        assert_eq!(parse_date("1895-12-28").unwrap(), date);
        assert!(parse_date("28.12.1895").is_err());
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }
}
