//! Data-access layer.
//!
//! Repositories own every query against the catalog tables. Soft-delete
//! narrowing (`deleted_at IS NULL`) is an invariant of this layer: no read
//! here returns a soft-deleted row, and nothing above this layer talks to
//! the database directly.

mod book_repo;
mod category_repo;
mod image_repo;
mod user_repo;

pub use book_repo::{BookRepository, BookWithRelations};
pub use category_repo::CategoryRepository;
pub use image_repo::ImageRepository;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub books: BookRepository,
    pub categories: CategoryRepository,
    pub images: ImageRepository,
    pub users: UserRepository,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            books: BookRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            images: ImageRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}
