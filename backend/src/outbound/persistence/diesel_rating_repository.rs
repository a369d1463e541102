//! PostgreSQL-backed `RatingRepository`.
//!
//! The conditional insert leans on the (user_id, course_id) unique constraint
//! with `ON CONFLICT DO NOTHING`, so two concurrent submissions cannot both
//! land.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{RatingInsert, RatingRepository, RatingRepositoryError};
use crate::domain::{NewRating, Rating, UserId};

use super::error_mapping::{categorise_diesel_error, categorise_pool_error, StoreError};
use super::models::{NewRatingRow, RatingRow};
use super::pool::{DbPool, PoolError};
use super::schema::ratings;

#[derive(Clone)]
pub struct DieselRatingRepository {
    pool: DbPool,
}

impl DieselRatingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_port_error(error: StoreError) -> RatingRepositoryError {
    match error {
        StoreError::Connection(message) => RatingRepositoryError::connection(message),
        StoreError::Query(message) => RatingRepositoryError::query(message),
    }
}

fn map_pool_error(error: PoolError) -> RatingRepositoryError {
    into_port_error(categorise_pool_error(error))
}

fn map_diesel_error(error: diesel::result::Error) -> RatingRepositoryError {
    into_port_error(categorise_diesel_error(error))
}

#[async_trait]
impl RatingRepository for DieselRatingRepository {
    async fn exists(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<bool, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = ratings::table
            .filter(ratings::user_id.eq(user_id.as_uuid()))
            .filter(ratings::course_id.eq(course_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count > 0)
    }

    async fn insert_if_absent(
        &self,
        rating: NewRating,
    ) -> Result<RatingInsert, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RatingRow> = diesel::insert_into(ratings::table)
            .values(NewRatingRow {
                user_id: *rating.user_id.as_uuid(),
                course_id: rating.course_id,
                score: rating.score.value(),
                message: rating.message,
            })
            .on_conflict((ratings::user_id, ratings::course_id))
            .do_nothing()
            .returning(RatingRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        match row {
            Some(row) => {
                let stored = Rating::try_from(row).map_err(|err| {
                    warn!(error = %err, "stored rating score fell outside the valid range");
                    RatingRepositoryError::query("stored rating is malformed")
                })?;
                Ok(RatingInsert::Inserted(stored))
            }
            None => Ok(RatingInsert::AlreadyRated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_failures_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(mapped, RatingRepositoryError::Connection { .. }));
    }
}
