//! Book response DTOs.
//!
//! Book create/update payloads arrive as multipart forms and are parsed in
//! the handler; only delete takes a JSON body.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::dto::CategoryResponse;
use crate::models::Image;
use crate::repositories::BookWithRelations;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub stock: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageResponse>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: Uuid,
    /// Public URL path of the stored file.
    pub path: String,
    /// Original file name.
    pub name: String,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            path: image.path,
            name: image.name,
        }
    }
}

impl From<BookWithRelations> for BookResponse {
    fn from((book, category, image): BookWithRelations) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            stock: book.stock,
            category: category.map(CategoryResponse::from),
            image: image.map(ImageResponse::from),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteBookRequest {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, Category};
    use chrono::Utc;

    #[test]
    fn response_nests_relations_in_camel_case() {
        let now = Utc::now().naive_utc();
        let category = Category {
            id: Uuid::new_v4(),
            name: "Fiksi".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let image = Image {
            id: Uuid::new_v4(),
            path: "/public/laskar-pelangi-a1B2c3.png".to_string(),
            name: "laskar pelangi.png".to_string(),
            created_at: now,
            deleted_at: None,
        };
        let book = Book {
            id: Uuid::new_v4(),
            title: "Laskar Pelangi".to_string(),
            author: "Andrea Hirata".to_string(),
            stock: 5,
            category_id: Some(category.id),
            image_id: Some(image.id),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let value = serde_json::to_value(BookResponse::from((
            book,
            Some(category),
            Some(image),
        )))
        .unwrap();

        assert_eq!(value["title"], "Laskar Pelangi");
        assert_eq!(value["category"]["name"], "Fiksi");
        assert_eq!(value["image"]["path"], "/public/laskar-pelangi-a1B2c3.png");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("deletedAt").is_none());
    }

    #[test]
    fn detached_book_has_no_category_key() {
        let now = Utc::now().naive_utc();
        let book = Book {
            id: Uuid::new_v4(),
            title: "Bumi Manusia".to_string(),
            author: "Pramoedya Ananta Toer".to_string(),
            stock: 2,
            category_id: None,
            image_id: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let value = serde_json::to_value(BookResponse::from((book, None, None))).unwrap();
        assert!(value.get("category").is_none());
        assert!(value.get("image").is_none());
    }
}
