//! PostgreSQL-backed `ProfileRepository`.
//!
//! The write path is a single `INSERT ... ON CONFLICT (user_id) DO UPDATE`,
//! so concurrent first edits of the same profile cannot race into a
//! duplicate key failure.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{InstructorProfile, ProfileUpdate, UserId};

use super::error_mapping::{categorise_diesel_error, categorise_pool_error, StoreError};
use super::models::{ProfileRow, ProfileUpsertRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_port_error(error: StoreError) -> ProfileRepositoryError {
    match error {
        StoreError::Connection(message) => ProfileRepositoryError::connection(message),
        StoreError::Query(message) => ProfileRepositoryError::query(message),
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    into_port_error(categorise_pool_error(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    into_port_error(categorise_diesel_error(error))
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<InstructorProfile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::user_id.eq(user_id.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(InstructorProfile::from))
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<InstructorProfile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ProfileRow = diesel::insert_into(profiles::table)
            .values(ProfileUpsertRow {
                user_id: *user_id.as_uuid(),
                bio: update.bio.clone(),
                banner_image_url: update.banner_image_url.clone(),
                cv_url: update.cv_url.clone(),
            })
            .on_conflict(profiles::user_id)
            .do_update()
            .set((
                profiles::bio.eq(update.bio),
                profiles::banner_image_url.eq(update.banner_image_url),
                profiles::cv_url.eq(update.cv_url),
                profiles::updated_at.eq(diesel::dsl::now),
            ))
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(InstructorProfile::from(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn diesel_failures_become_query_errors() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, ProfileRepositoryError::Query { .. }));
    }
}
