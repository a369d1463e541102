//! PostgreSQL-backed `CourseRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Chapter, Course, UserId};

use super::error_mapping::{categorise_diesel_error, categorise_pool_error, StoreError};
use super::models::{ChapterRow, CourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::{chapters, courses};

/// Diesel adapter for the course catalogue.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_port_error(error: StoreError) -> CourseRepositoryError {
    match error {
        StoreError::Connection(message) => CourseRepositoryError::connection(message),
        StoreError::Query(message) => CourseRepositoryError::query(message),
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    into_port_error(categorise_pool_error(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    into_port_error(categorise_diesel_error(error))
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn find_published_course(
        &self,
        course_id: Uuid,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = courses::table
            .filter(courses::id.eq(course_id))
            .filter(courses::is_published.eq(true))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Course::from))
    }

    async fn find_course_owned_by(
        &self,
        course_id: Uuid,
        owner_id: &UserId,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = courses::table
            .filter(courses::id.eq(course_id))
            .filter(courses::user_id.eq(owner_id.as_uuid()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Course::from))
    }

    async fn find_published_chapter(
        &self,
        course_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<Option<Chapter>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ChapterRow> = chapters::table
            .filter(chapters::id.eq(chapter_id))
            .filter(chapters::course_id.eq(course_id))
            .filter(chapters::is_published.eq(true))
            .select(ChapterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Chapter::from))
    }

    async fn published_chapters(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<Chapter>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ChapterRow> = chapters::table
            .filter(chapters::course_id.eq(course_id))
            .filter(chapters::is_published.eq(true))
            .order(chapters::position.asc())
            .select(ChapterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Chapter::from).collect())
    }

    async fn published_chapter_count(
        &self,
        course_id: Uuid,
    ) -> Result<u64, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = chapters::table
            .filter(chapters::course_id.eq(course_id))
            .filter(chapters::is_published.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn published_courses_owned_by(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .filter(courses::user_id.eq(owner_id.as_uuid()))
            .filter(courses::is_published.eq(true))
            .order(courses::created_at.desc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn unpublish_chapter(
        &self,
        course_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<Option<Chapter>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ChapterRow> = diesel::update(
            chapters::table
                .filter(chapters::id.eq(chapter_id))
                .filter(chapters::course_id.eq(course_id)),
        )
        .set((
            chapters::is_published.eq(false),
            chapters::updated_at.eq(diesel::dsl::now),
        ))
        .returning(ChapterRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(row.map(Chapter::from))
    }

    async fn unpublish_course(&self, course_id: Uuid) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(courses::table.filter(courses::id.eq(course_id)))
            .set((
                courses::is_published.eq(false),
                courses::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_failures_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(mapped, CourseRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_failures_become_query_errors() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, CourseRepositoryError::Query { .. }));
    }
}
