//! Book business logic: listing, diff-based updates and cover handling.

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Book, BookChanges, Image, NewBook, NewImage};
use crate::repositories::{BookRepository, BookWithRelations, CategoryRepository, ImageRepository};
use crate::services::upload_service::{UploadedFile, validate_image};
use crate::services::{PageRequest, UpdateOutcome};
use crate::storage::ImageStore;
use crate::utils::filename;

/// Fields for creating a book. The cover comes either as an uploaded file
/// or as the path of a previously uploaded one.
#[derive(Debug, Clone)]
pub struct CreateBookInput {
    pub title: String,
    pub author: String,
    pub stock: i32,
    pub category_id: Uuid,
    pub image: Option<UploadedFile>,
    pub image_path: Option<String>,
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookInput {
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub stock: Option<i32>,
    pub category_id: Option<Uuid>,
    pub image: Option<UploadedFile>,
}

/// A book list page with catalog-wide totals.
#[derive(Debug, Clone)]
pub struct BookPage {
    pub items: Vec<BookWithRelations>,
    pub total: i64,
    /// Sum of stock over all non-deleted books, independent of the page.
    pub total_stock: i64,
}

#[derive(Clone)]
pub struct BookService {
    books: BookRepository,
    categories: CategoryRepository,
    images: ImageRepository,
    store: ImageStore,
    max_upload_bytes: u64,
}

impl BookService {
    pub fn new(
        books: BookRepository,
        categories: CategoryRepository,
        images: ImageRepository,
        store: ImageStore,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            books,
            categories,
            images,
            store,
            max_upload_bytes,
        }
    }

    pub async fn list(&self, page: PageRequest) -> AppResult<BookPage> {
        let items = self.books.list_page(page.offset(), page.page_size).await?;
        let total = self.books.count().await?;
        let total_stock = self.books.total_stock().await?;
        Ok(BookPage {
            items,
            total,
            total_stock,
        })
    }

    /// Creates a book with its cover image.
    ///
    /// Field and category validation run before any file is written, so a
    /// rejected request leaves no orphan on disk.
    pub async fn create(&self, input: CreateBookInput) -> AppResult<BookWithRelations> {
        let title = required_text("title", &input.title)?;
        let author = required_text("author", &input.author)?;
        validate_stock(input.stock)?;
        if let Some(file) = &input.image {
            validate_image(file, self.max_upload_bytes)?;
        }

        let category = self
            .categories
            .find_by_id(input.category_id)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))?;

        let image = match (input.image, input.image_path) {
            (Some(file), _) => self.store_cover(file).await?,
            (None, Some(path)) => self.register_uploaded_path(&path).await?,
            (None, None) => {
                return Err(AppError::validation("image", "Image is required"));
            }
        };

        let book = self
            .books
            .insert(NewBook {
                id: Uuid::new_v4(),
                title,
                author,
                stock: input.stock,
                category_id: Some(category.id),
                image_id: Some(image.id),
            })
            .await?;

        Ok((book, Some(category), Some(image)))
    }

    /// Applies a diff-based update.
    ///
    /// When nothing changed and no new cover was supplied, no write is
    /// issued and the stored row is returned as `Unchanged`. A new cover is
    /// written and the book re-pointed before the old file is unlinked, so
    /// the row never references a missing file.
    pub async fn update(
        &self,
        input: UpdateBookInput,
    ) -> AppResult<UpdateOutcome<BookWithRelations>> {
        let book = self
            .books
            .find_by_id(input.id)
            .await?
            .ok_or_else(|| AppError::not_found("Book"))?;

        let mut changes = compute_changes(&book, &input)?;

        if input.image.is_none() && changes.is_empty() {
            let current = self.current_relations(book.id).await?;
            return Ok(UpdateOutcome::Unchanged(current));
        }

        if let Some(category_id) = changes.category_id {
            self.categories
                .find_by_id(category_id)
                .await?
                .ok_or_else(|| AppError::not_found("Category"))?;
        }

        let old_image_id = book.image_id;
        if let Some(file) = input.image {
            validate_image(&file, self.max_upload_bytes)?;
            let image = self.store_cover(file).await?;
            changes.image_id = Some(image.id);
        }
        let replaced_cover = changes.image_id.is_some();

        changes.updated_at = Some(Utc::now().naive_utc());
        self.books.update(book.id, changes).await?;

        // Old cover goes away only after the row points at the new one.
        if replaced_cover {
            if let Some(old_id) = old_image_id {
                self.retire_image(old_id).await;
            }
        }

        let updated = self.current_relations(book.id).await?;
        Ok(UpdateOutcome::Updated(updated))
    }

    /// Soft-deletes the book, then best-effort retires its cover.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let book = self
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book"))?;

        let affected = self
            .books
            .soft_delete(book.id, Utc::now().naive_utc())
            .await?;
        if affected == 0 {
            return Err(AppError::not_found("Book"));
        }

        if let Some(image_id) = book.image_id {
            self.retire_image(image_id).await;
        }
        Ok(())
    }

    /// Stores an uploaded cover and records its image row.
    async fn store_cover(&self, file: UploadedFile) -> AppResult<Image> {
        let stored_name = filename::cover_filename(&file.name);
        let path = self.store.save(&stored_name, &file.bytes).await?;
        self.images
            .insert(NewImage {
                id: Uuid::new_v4(),
                path,
                name: file.name,
            })
            .await
    }

    /// Records an image row for a file already stored via the upload
    /// endpoint.
    async fn register_uploaded_path(&self, path: &str) -> AppResult<Image> {
        let path = path.trim();
        if path.is_empty() {
            return Err(AppError::validation("image", "Image is required"));
        }
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        self.images
            .insert(NewImage {
                id: Uuid::new_v4(),
                path: path.to_string(),
                name,
            })
            .await
    }

    /// Soft-deletes an image row and unlinks its file. Failures are logged,
    /// never surfaced; a missing file must not fail the catalog write that
    /// already succeeded.
    async fn retire_image(&self, image_id: Uuid) {
        match self.images.find_by_id(image_id).await {
            Ok(Some(image)) => {
                if let Err(error) = self.images.soft_delete(image_id, Utc::now().naive_utc()).await
                {
                    warn!(image_id = %image_id, %error, "failed to soft-delete image row");
                }
                self.store.remove(&image.path).await;
            }
            Ok(None) => {}
            Err(error) => {
                warn!(image_id = %image_id, %error, "failed to load image row for cleanup");
            }
        }
    }

    async fn current_relations(&self, id: Uuid) -> AppResult<BookWithRelations> {
        self.books
            .find_with_relations(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book"))
    }
}

fn required_text(field: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(field, "Field must not be empty"));
    }
    Ok(value.to_string())
}

fn validate_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::validation("stock", "Stock must not be negative"));
    }
    Ok(())
}

/// Computes the field diff between the stored book and the payload.
///
/// Only fields whose supplied value differs from the stored one enter the
/// changeset; supplied-but-equal fields produce no write.
fn compute_changes(book: &Book, input: &UpdateBookInput) -> AppResult<BookChanges> {
    let mut changes = BookChanges::default();

    if let Some(title) = &input.title {
        let title = required_text("title", title)?;
        if title != book.title {
            changes.title = Some(title);
        }
    }
    if let Some(author) = &input.author {
        let author = required_text("author", author)?;
        if author != book.author {
            changes.author = Some(author);
        }
    }
    if let Some(stock) = input.stock {
        validate_stock(stock)?;
        if stock != book.stock {
            changes.stock = Some(stock);
        }
    }
    if let Some(category_id) = input.category_id {
        if book.category_id != Some(category_id) {
            changes.category_id = Some(category_id);
        }
    }

    Ok(changes)
}
