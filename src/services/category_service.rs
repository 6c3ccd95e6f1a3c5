//! Category business logic.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory};
use crate::repositories::CategoryRepository;
use crate::services::{PageRequest, UpdateOutcome};

/// A category annotated with its non-deleted book count.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithCount {
    pub category: Category,
    pub book_count: i64,
}

#[derive(Clone)]
pub struct CategoryService {
    repo: CategoryRepository,
}

impl CategoryService {
    pub fn new(repo: CategoryRepository) -> Self {
        Self { repo }
    }

    /// One page of categories with book counts, plus the overall total.
    pub async fn list(&self, page: PageRequest) -> AppResult<(Vec<CategoryWithCount>, i64)> {
        let categories = self.repo.list_page(page.offset(), page.page_size).await?;
        let total = self.repo.count().await?;

        let ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
        let counts: HashMap<Uuid, i64> = self
            .repo
            .book_counts(&ids)
            .await?
            .into_iter()
            .filter_map(|(id, count)| id.map(|id| (id, count)))
            .collect();

        let items = categories
            .into_iter()
            .map(|category| {
                let book_count = counts.get(&category.id).copied().unwrap_or(0);
                CategoryWithCount { category, book_count }
            })
            .collect();
        Ok((items, total))
    }

    /// Creates a category from a trimmed, unique name.
    pub async fn create(&self, name: &str) -> AppResult<Category> {
        let name = normalized_name(name)?;

        if self.repo.find_by_name(&name).await?.is_some() {
            return Err(duplicate_name(&name));
        }

        self.repo
            .insert(NewCategory {
                id: Uuid::new_v4(),
                name,
            })
            .await
    }

    /// Renames a category; an unchanged name short-circuits without a write.
    pub async fn update(&self, id: Uuid, name: &str) -> AppResult<UpdateOutcome<Category>> {
        let name = normalized_name(name)?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))?;

        if existing.name == name {
            return Ok(UpdateOutcome::Unchanged(existing));
        }

        if let Some(other) = self.repo.find_by_name(&name).await? {
            if other.id != id {
                return Err(duplicate_name(&name));
            }
        }

        let updated = self.repo.rename(id, &name, Utc::now().naive_utc()).await?;
        Ok(UpdateOutcome::Updated(updated))
    }

    /// Soft-deletes the category and detaches its books atomically.
    ///
    /// Returns the number of detached books.
    pub async fn delete(&self, id: Uuid) -> AppResult<usize> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))?;

        self.repo
            .soft_delete_and_detach(id, Utc::now().naive_utc())
            .await
    }
}

fn normalized_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "Name must not be empty"));
    }
    Ok(name.to_string())
}

fn duplicate_name(name: &str) -> AppError {
    AppError::Duplicate {
        entity: "Category".to_string(),
        field: "name".to_string(),
        value: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_name_trims_whitespace() {
        assert_eq!(normalized_name("  Fiksi  ").unwrap(), "Fiksi");
    }

    #[test]
    fn normalized_name_rejects_blank() {
        assert!(matches!(
            normalized_name("   "),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn duplicate_name_maps_to_conflict_variant() {
        let err = duplicate_name("Fiksi");
        match err {
            AppError::Duplicate { entity, field, value } => {
                assert_eq!(entity, "Category");
                assert_eq!(field, "name");
                assert_eq!(value, "Fiksi");
            }
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }
}
