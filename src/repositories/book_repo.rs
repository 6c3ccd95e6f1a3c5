//! Book repository.
//!
//! List reads join category and image in a single query so the catalog page
//! never issues per-row lookups.

use chrono::NaiveDateTime;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::{AsyncDbPool, DbConnection};
use crate::error::{AppError, AppResult};
use crate::models::{Book, BookChanges, Category, Image, NewBook};
use crate::schema::{books, categories, images};

/// A book joined with its optional category and image.
pub type BookWithRelations = (Book, Option<Category>, Option<Image>);

#[derive(Clone)]
pub struct BookRepository {
    pool: AsyncDbPool,
}

impl BookRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> AppResult<DbConnection<'_>> {
        self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::new(e),
        })
    }

    /// One page of non-deleted books, most recently touched first.
    pub async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<BookWithRelations>> {
        let mut conn = self.conn().await?;

        books::table
            .left_join(categories::table)
            .left_join(images::table)
            .filter(books::deleted_at.is_null())
            .order((books::updated_at.desc(), books::created_at.desc()))
            .offset(offset)
            .limit(limit)
            .select((
                Book::as_select(),
                Option::<Category>::as_select(),
                Option::<Image>::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let mut conn = self.conn().await?;

        books::table
            .filter(books::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Sum of stock over all non-deleted books, not just the current page.
    pub async fn total_stock(&self) -> AppResult<i64> {
        let mut conn = self.conn().await?;

        let total: Option<i64> = books::table
            .filter(books::deleted_at.is_null())
            .select(sum(books::stock))
            .first(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(total.unwrap_or(0))
    }

    pub async fn find_by_id(&self, book_id: Uuid) -> AppResult<Option<Book>> {
        let mut conn = self.conn().await?;

        books::table
            .filter(books::id.eq(book_id))
            .filter(books::deleted_at.is_null())
            .select(Book::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_with_relations(
        &self,
        book_id: Uuid,
    ) -> AppResult<Option<BookWithRelations>> {
        let mut conn = self.conn().await?;

        books::table
            .left_join(categories::table)
            .left_join(images::table)
            .filter(books::id.eq(book_id))
            .filter(books::deleted_at.is_null())
            .select((
                Book::as_select(),
                Option::<Category>::as_select(),
                Option::<Image>::as_select(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn insert(&self, new_book: NewBook) -> AppResult<Book> {
        let mut conn = self.conn().await?;

        diesel::insert_into(books::table)
            .values(&new_book)
            .returning(Book::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Applies a diff changeset to a non-deleted book.
    pub async fn update(&self, book_id: Uuid, changes: BookChanges) -> AppResult<Book> {
        let mut conn = self.conn().await?;

        diesel::update(
            books::table
                .filter(books::id.eq(book_id))
                .filter(books::deleted_at.is_null()),
        )
        .set(&changes)
        .returning(Book::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(AppError::from)
    }

    /// Marks the book deleted; returns the number of affected rows so
    /// callers can distinguish a stale id from a successful delete.
    pub async fn soft_delete(&self, book_id: Uuid, at: NaiveDateTime) -> AppResult<usize> {
        let mut conn = self.conn().await?;

        diesel::update(
            books::table
                .filter(books::id.eq(book_id))
                .filter(books::deleted_at.is_null()),
        )
        .set(books::deleted_at.eq(Some(at)))
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }
}
