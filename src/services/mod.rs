//! Business-logic layer.
//!
//! Services own validation, diffing and orchestration across repositories
//! and the image store; handlers above them only translate HTTP.

mod auth_service;
mod book_service;
mod category_service;
mod upload_service;

pub use auth_service::{AuthService, TokenPair};
pub use book_service::{BookPage, BookService, CreateBookInput, UpdateBookInput};
pub use category_service::{CategoryService, CategoryWithCount};
pub use upload_service::{StoredUpload, UploadService, UploadedFile};

use crate::config::Settings;
use crate::repositories::Repositories;
use crate::storage::ImageStore;

/// Aggregates all services for convenient access from handlers.
///
/// Cloning is cheap since the underlying pool and store use `Arc`-backed
/// or small owned state.
#[derive(Clone)]
pub struct Services {
    pub books: BookService,
    pub categories: CategoryService,
    pub uploads: UploadService,
    pub auth: AuthService,
}

impl Services {
    pub fn new(repos: Repositories, store: ImageStore, settings: &Settings) -> Self {
        let max_upload_bytes = settings.storage.max_upload_bytes;
        Self {
            books: BookService::new(
                repos.books,
                repos.categories.clone(),
                repos.images,
                store.clone(),
                max_upload_bytes,
            ),
            categories: CategoryService::new(repos.categories),
            uploads: UploadService::new(store, max_upload_bytes),
            auth: AuthService::new(repos.users, settings.auth.clone()),
        }
    }
}

/// Normalized pagination request.
///
/// Page defaults to 1 and is floored at 1; page size defaults to 10 and is
/// clamped to `[1, 100]`. Out-of-range client input is corrected, not
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
    pub const MAX_PAGE_SIZE: i64 = 100;

    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(Self::DEFAULT_PAGE_SIZE)
                .clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// `max(1, ceil(total / page_size))`; an empty result set still has one
    /// (empty) page.
    pub fn total_pages(&self, total: i64) -> i64 {
        (total.max(0) + self.page_size - 1).div_euclid(self.page_size).max(1)
    }
}

/// Result of an update: either applied writes or a verified no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome<T> {
    /// Stored state already matched the payload; zero writes were issued.
    Unchanged(T),
    Updated(T),
}

impl<T> UpdateOutcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            UpdateOutcome::Unchanged(value) | UpdateOutcome::Updated(value) => value,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, UpdateOutcome::Unchanged(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_when_params_absent() {
        let req = PageRequest::new(None, None);
        assert_eq!(req, PageRequest { page: 1, page_size: 10 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn page_floored_and_size_clamped() {
        let req = PageRequest::new(Some(0), Some(1000));
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 100);

        let req = PageRequest::new(Some(-5), Some(0));
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 1);
    }

    #[test]
    fn total_pages_has_floor_of_one() {
        let req = PageRequest::new(Some(1), Some(10));
        assert_eq!(req.total_pages(0), 1);
        assert_eq!(req.total_pages(10), 1);
        assert_eq!(req.total_pages(11), 2);
        assert_eq!(req.total_pages(95), 10);
    }

    proptest! {
        #[test]
        fn total_pages_matches_ceiling_division(
            total in 0i64..1_000_000,
            page_size in 1i64..=100,
        ) {
            let req = PageRequest::new(Some(1), Some(page_size));
            let expected = ((total as f64) / (page_size as f64)).ceil() as i64;
            prop_assert_eq!(req.total_pages(total), expected.max(1));
        }

        #[test]
        fn normalization_always_lands_in_range(page: i64, page_size: i64) {
            let req = PageRequest::new(Some(page), Some(page_size));
            prop_assert!(req.page >= 1);
            prop_assert!((1..=100).contains(&req.page_size));
            prop_assert!(req.offset() >= 0);
        }
    }
}
