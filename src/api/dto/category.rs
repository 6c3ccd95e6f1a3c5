//! Category request/response DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Category;
use crate::services::CategoryWithCount;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Count of non-deleted books; only present on category lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_count: Option<i64>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
            book_count: None,
        }
    }
}

impl From<CategoryWithCount> for CategoryResponse {
    fn from(item: CategoryWithCount) -> Self {
        let mut response = CategoryResponse::from(item.category);
        response.book_count = Some(item.book_count);
        response
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    pub id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteCategoryRequest {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category() -> Category {
        let now = Utc::now().naive_utc();
        Category {
            id: Uuid::new_v4(),
            name: "Fiksi".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn plain_response_omits_book_count() {
        let value = serde_json::to_value(CategoryResponse::from(category())).unwrap();
        assert_eq!(value["name"], "Fiksi");
        assert!(value.get("bookCount").is_none());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn list_response_carries_book_count() {
        let item = CategoryWithCount {
            category: category(),
            book_count: 7,
        };
        let value = serde_json::to_value(CategoryResponse::from(item)).unwrap();
        assert_eq!(value["bookCount"], 7);
    }
}
