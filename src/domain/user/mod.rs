pub mod entity;
pub mod invariants;

pub use entity::{NewUser, User, UserPatch, UserRecord};
pub use invariants::validate_user;
