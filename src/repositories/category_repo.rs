//! Category repository.
//!
//! Holds the transactional delete-and-detach: soft-deleting a category and
//! clearing `category_id` on its books must commit together or not at all.

use chrono::NaiveDateTime;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::db::{AsyncDbPool, DbConnection};
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory};
use crate::schema::{books, categories};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> AppResult<DbConnection<'_>> {
        self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::new(e),
        })
    }

    /// One page of non-deleted categories, ordered by name.
    pub async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Category>> {
        let mut conn = self.conn().await?;

        categories::table
            .filter(categories::deleted_at.is_null())
            .order(categories::name.asc())
            .offset(offset)
            .limit(limit)
            .select(Category::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let mut conn = self.conn().await?;

        categories::table
            .filter(categories::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, category_id: Uuid) -> AppResult<Option<Category>> {
        let mut conn = self.conn().await?;

        categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::deleted_at.is_null())
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Exact-match lookup among non-deleted categories; backs the duplicate
    /// name check.
    pub async fn find_by_name(&self, category_name: &str) -> AppResult<Option<Category>> {
        let mut conn = self.conn().await?;

        categories::table
            .filter(categories::name.eq(category_name))
            .filter(categories::deleted_at.is_null())
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn insert(&self, new_category: NewCategory) -> AppResult<Category> {
        let mut conn = self.conn().await?;

        diesel::insert_into(categories::table)
            .values(&new_category)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn rename(
        &self,
        category_id: Uuid,
        new_name: &str,
        at: NaiveDateTime,
    ) -> AppResult<Category> {
        let mut conn = self.conn().await?;

        diesel::update(
            categories::table
                .filter(categories::id.eq(category_id))
                .filter(categories::deleted_at.is_null()),
        )
        .set((
            categories::name.eq(new_name),
            categories::updated_at.eq(at),
        ))
        .returning(Category::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(AppError::from)
    }

    /// Soft-deletes the category and detaches its books in one transaction.
    ///
    /// Returns the number of detached books. Either both writes commit or
    /// neither does; a failure between them rolls everything back.
    pub async fn soft_delete_and_detach(
        &self,
        category_id: Uuid,
        at: NaiveDateTime,
    ) -> AppResult<usize> {
        let mut conn = self.conn().await?;

        let detached = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let detached = diesel::update(
                        books::table
                            .filter(books::category_id.eq(Some(category_id)))
                            .filter(books::deleted_at.is_null()),
                    )
                    .set((
                        books::category_id.eq(None::<Uuid>),
                        books::updated_at.eq(at),
                    ))
                    .execute(conn)
                    .await?;

                    diesel::update(
                        categories::table
                            .filter(categories::id.eq(category_id))
                            .filter(categories::deleted_at.is_null()),
                    )
                    .set(categories::deleted_at.eq(Some(at)))
                    .execute(conn)
                    .await?;

                    Ok(detached)
                }
                .scope_boxed()
            })
            .await?;

        Ok(detached)
    }

    /// Counts non-deleted books per category for the given ids.
    ///
    /// Categories with no books are absent from the result; callers treat a
    /// missing entry as zero.
    pub async fn book_counts(&self, ids: &[Uuid]) -> AppResult<Vec<(Option<Uuid>, i64)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let wanted: Vec<Option<Uuid>> = ids.iter().map(|id| Some(*id)).collect();

        books::table
            .filter(books::deleted_at.is_null())
            .filter(books::category_id.eq_any(wanted))
            .group_by(books::category_id)
            .select((books::category_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
