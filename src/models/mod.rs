//! Database models for the catalog domain.
//!
//! Each entity has a read model (Queryable/Selectable), an insert model
//! (Insertable) and, where partial updates exist, a changeset (AsChangeset).

mod book;
mod category;
mod image;
mod user;

pub use book::{Book, BookChanges, NewBook};
pub use category::{Category, NewCategory};
pub use image::{Image, NewImage};
pub use user::{NewUser, User};
