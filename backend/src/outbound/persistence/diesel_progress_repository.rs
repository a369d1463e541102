//! PostgreSQL-backed `ProgressRepository`.
//!
//! Completion counts join through `chapters` so draft chapters never count
//! towards a course percentage.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProgressRepository, ProgressRepositoryError};
use crate::domain::{UserId, UserProgress};

use super::error_mapping::{categorise_diesel_error, categorise_pool_error, StoreError};
use super::models::{NewUserProgressRow, UserProgressRow};
use super::pool::{DbPool, PoolError};
use super::schema::{chapters, user_progress};

#[derive(Clone)]
pub struct DieselProgressRepository {
    pool: DbPool,
}

impl DieselProgressRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_port_error(error: StoreError) -> ProgressRepositoryError {
    match error {
        StoreError::Connection(message) => ProgressRepositoryError::connection(message),
        StoreError::Query(message) => ProgressRepositoryError::query(message),
    }
}

fn map_pool_error(error: PoolError) -> ProgressRepositoryError {
    into_port_error(categorise_pool_error(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ProgressRepositoryError {
    into_port_error(categorise_diesel_error(error))
}

#[async_trait]
impl ProgressRepository for DieselProgressRepository {
    async fn find(
        &self,
        user_id: &UserId,
        chapter_id: Uuid,
    ) -> Result<Option<UserProgress>, ProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserProgressRow> = user_progress::table
            .filter(user_progress::user_id.eq(user_id.as_uuid()))
            .filter(user_progress::chapter_id.eq(chapter_id))
            .select(UserProgressRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserProgress::from))
    }

    async fn completed_chapter_ids(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<Vec<Uuid>, ProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<Uuid> = user_progress::table
            .inner_join(chapters::table)
            .filter(user_progress::user_id.eq(user_id.as_uuid()))
            .filter(user_progress::is_completed.eq(true))
            .filter(chapters::course_id.eq(course_id))
            .filter(chapters::is_published.eq(true))
            .select(user_progress::chapter_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids)
    }

    async fn has_completed_any(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<bool, ProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = user_progress::table
            .inner_join(chapters::table)
            .filter(user_progress::user_id.eq(user_id.as_uuid()))
            .filter(user_progress::is_completed.eq(true))
            .filter(chapters::course_id.eq(course_id))
            .filter(chapters::is_published.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count > 0)
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        chapter_id: Uuid,
        is_completed: bool,
    ) -> Result<UserProgress, ProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserProgressRow = diesel::insert_into(user_progress::table)
            .values(NewUserProgressRow {
                user_id: *user_id.as_uuid(),
                chapter_id,
                is_completed,
            })
            .on_conflict((user_progress::user_id, user_progress::chapter_id))
            .do_update()
            .set((
                user_progress::is_completed.eq(is_completed),
                user_progress::updated_at.eq(diesel::dsl::now),
            ))
            .returning(UserProgressRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(UserProgress::from(row))
    }
}
