//! Popularity ranking
//!
//! Films are ordered by like count, most liked first. Equal counts fall back
//! to ascending film id so the order never depends on storage.

use std::collections::HashMap;

use super::film::Film;
use crate::domain::{DomainError, DomainResult};

/// Used by transports when the caller does not ask for a size
pub const DEFAULT_POPULAR_COUNT: i64 = 10;

/// Rejects non-positive sizes
pub fn validate_popular_count(count: i64) -> DomainResult<usize> {
    if count <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Popular films count must be positive, got {}",
            count
        )));
    }
    Ok(usize::try_from(count).unwrap_or(usize::MAX))
}

/// Ranks `films` by their entry in `like_counts` (missing means zero likes)
/// and keeps the first `limit`.
pub fn rank_by_likes(mut films: Vec<Film>, like_counts: &HashMap<i64, u64>, limit: usize) -> Vec<Film> {
    let likes = |film: &Film| like_counts.get(&film.id).copied().unwrap_or(0);

    films.sort_by(|a, b| likes(b).cmp(&likes(a)).then(a.id.cmp(&b.id)));
    films.truncate(limit);
    films
}
