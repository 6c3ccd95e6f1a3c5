//! User repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{AsyncDbPool, DbConnection};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

/// Admin user repository.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> AppResult<DbConnection<'_>> {
        self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::new(e),
        })
    }

    /// Finds a non-deleted user by email.
    pub async fn find_by_email(&self, user_email: &str) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.conn().await?;

        users
            .filter(email.eq(user_email))
            .filter(deleted_at.is_null())
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a non-deleted user by id.
    pub async fn find_by_id(&self, user_id: i32) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.conn().await?;

        users
            .filter(id.eq(user_id))
            .filter(deleted_at.is_null())
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Inserts a user, skipping rows whose email already exists so seeding
    /// stays idempotent. Returns `None` when the email was already taken.
    pub async fn insert_if_absent(&self, new_user: NewUser) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.conn().await?;

        diesel::insert_into(users)
            .values(&new_user)
            .on_conflict(email)
            .do_nothing()
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
