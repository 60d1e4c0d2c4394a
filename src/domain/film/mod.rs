pub mod entity;
pub mod invariants;

pub use entity::{Film, FilmDraft, FilmRecord};
pub use invariants::{validate_film_draft, MAX_DESCRIPTION_LENGTH, MIN_RELEASE_DATE};
