use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Genre, Mpa};

/// A film as stored in the catalog
/// References are always resolved: `mpa` and `genres` carry full catalog rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// Assigned by storage on creation
    pub id: i64,

    pub name: String,

    /// At most 200 characters, empty when not supplied
    pub description: String,

    /// Never earlier than the cinema epoch
    pub release_date: NaiveDate,

    /// Duration in minutes
    pub duration: u32,

    pub mpa: Mpa,

    /// Unique by id, ascending id order
    pub genres: Vec<Genre>,
}

/// Incoming film data before validation
/// Used for both creation and full-replace updates
#[derive(Debug, Clone, Default)]
pub struct FilmDraft {
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: i32,
    pub mpa_id: Option<i64>,
    pub genre_ids: Vec<i64>,
}

/// A draft that passed every local rule, ready to be written through a repository
/// Reference ids are well-formed but not yet known to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmRecord {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    pub mpa_id: i64,
    pub genre_ids: BTreeSet<i64>,
}

impl FilmDraft {
    pub fn new(name: impl Into<String>, release_date: NaiveDate, duration: i32, mpa_id: i64) -> Self {
        Self {
            name: name.into(),
            description: None,
            release_date: Some(release_date),
            duration,
            mpa_id: Some(mpa_id),
            genre_ids: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_genres(mut self, genre_ids: impl IntoIterator<Item = i64>) -> Self {
        self.genre_ids = genre_ids.into_iter().collect();
        self
    }
}

impl Film {
    pub fn genre_ids(&self) -> Vec<i64> {
        self.genres.iter().map(|g| g.id).collect()
    }
}
