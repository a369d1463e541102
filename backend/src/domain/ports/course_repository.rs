//! Port for course and chapter persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Chapter, Course, UserId};

/// Errors raised by course repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseRepositoryError {
    /// Repository connection could not be established.
    #[error("course repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("course repository query failed: {message}")]
    Query { message: String },
}

impl CourseRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for reading and publishing course catalogue rows.
///
/// Lookups are scoped to published rows except where an operation is
/// explicitly for the owning instructor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Fetch a published course by id.
    async fn find_published_course(
        &self,
        course_id: Uuid,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Fetch a course only when `owner_id` owns it, regardless of publication.
    async fn find_course_owned_by(
        &self,
        course_id: Uuid,
        owner_id: &UserId,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Fetch a published chapter belonging to the given course.
    async fn find_published_chapter(
        &self,
        course_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<Option<Chapter>, CourseRepositoryError>;

    /// All published chapters of a course, ordered by position.
    async fn published_chapters(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<Chapter>, CourseRepositoryError>;

    /// Count of published chapters in a course.
    async fn published_chapter_count(
        &self,
        course_id: Uuid,
    ) -> Result<u64, CourseRepositoryError>;

    /// Published courses owned by a user, newest first.
    async fn published_courses_owned_by(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Mark a chapter unpublished; returns the updated chapter, or `None`
    /// when the chapter does not belong to the course.
    async fn unpublish_chapter(
        &self,
        course_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<Option<Chapter>, CourseRepositoryError>;

    /// Mark a course unpublished.
    async fn unpublish_course(&self, course_id: Uuid) -> Result<(), CourseRepositoryError>;
}

/// Fixture implementation backed by no data; every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseRepository;

#[async_trait]
impl CourseRepository for FixtureCourseRepository {
    async fn find_published_course(
        &self,
        _course_id: Uuid,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn find_course_owned_by(
        &self,
        _course_id: Uuid,
        _owner_id: &UserId,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn find_published_chapter(
        &self,
        _course_id: Uuid,
        _chapter_id: Uuid,
    ) -> Result<Option<Chapter>, CourseRepositoryError> {
        Ok(None)
    }

    async fn published_chapters(
        &self,
        _course_id: Uuid,
    ) -> Result<Vec<Chapter>, CourseRepositoryError> {
        Ok(Vec::new())
    }

    async fn published_chapter_count(
        &self,
        _course_id: Uuid,
    ) -> Result<u64, CourseRepositoryError> {
        Ok(0)
    }

    async fn published_courses_owned_by(
        &self,
        _owner_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(Vec::new())
    }

    async fn unpublish_chapter(
        &self,
        _course_id: Uuid,
        _chapter_id: Uuid,
    ) -> Result<Option<Chapter>, CourseRepositoryError> {
        Ok(None)
    }

    async fn unpublish_course(&self, _course_id: Uuid) -> Result<(), CourseRepositoryError> {
        Ok(())
    }
}
