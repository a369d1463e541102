//! Instructor-side publication changes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{CourseRepository, CourseRepositoryError, PublishCommand};
use crate::domain::{Chapter, Error, UserId};

/// Publication state transitions over the course catalogue.
#[derive(Clone)]
pub struct PublishService<C> {
    course_repo: Arc<C>,
}

impl<C> PublishService<C> {
    /// Create a new service over the given catalogue.
    pub fn new(course_repo: Arc<C>) -> Self {
        Self { course_repo }
    }
}

fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
    }
}

#[async_trait]
impl<C> PublishCommand for PublishService<C>
where
    C: CourseRepository,
{
    async fn unpublish_chapter(
        &self,
        user_id: &UserId,
        course_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<Chapter, Error> {
        // Ownership gates the whole operation; a course someone else owns
        // is indistinguishable from a missing one.
        self.course_repo
            .find_course_owned_by(course_id, user_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::unauthorized("course is not owned by the caller"))?;

        let chapter = self
            .course_repo
            .unpublish_chapter(course_id, chapter_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found("chapter not found"))?;

        let remaining = self
            .course_repo
            .published_chapter_count(course_id)
            .await
            .map_err(map_course_error)?;
        if remaining == 0 {
            self.course_repo
                .unpublish_course(course_id)
                .await
                .map_err(map_course_error)?;
            info!(%course_id, "last published chapter removed, course unpublished");
        }

        Ok(chapter)
    }
}
