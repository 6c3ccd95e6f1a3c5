//! Image metadata repository.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::{AsyncDbPool, DbConnection};
use crate::error::{AppError, AppResult};
use crate::models::{Image, NewImage};

#[derive(Clone)]
pub struct ImageRepository {
    pool: AsyncDbPool,
}

impl ImageRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> AppResult<DbConnection<'_>> {
        self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::new(e),
        })
    }

    pub async fn insert(&self, new_image: NewImage) -> AppResult<Image> {
        use crate::schema::images::dsl::*;
        let mut conn = self.conn().await?;

        diesel::insert_into(images)
            .values(&new_image)
            .returning(Image::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, image_id: Uuid) -> AppResult<Option<Image>> {
        use crate::schema::images::dsl::*;
        let mut conn = self.conn().await?;

        images
            .filter(id.eq(image_id))
            .filter(deleted_at.is_null())
            .select(Image::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Marks the row as deleted. Already-deleted rows are left untouched.
    pub async fn soft_delete(&self, image_id: Uuid, at: NaiveDateTime) -> AppResult<usize> {
        use crate::schema::images::dsl::*;
        let mut conn = self.conn().await?;

        diesel::update(images.filter(id.eq(image_id)).filter(deleted_at.is_null()))
            .set(deleted_at.eq(Some(at)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
