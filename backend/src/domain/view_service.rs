//! Read-side view assembly for the chapter page, course layout, and
//! instructor course lists, plus the completion toggle from the player.
//!
//! The chapter page and instructor list degrade on store failures: a failed
//! assembly yields the empty shape rather than an error, matching the
//! product's fail-soft reads. The course layout stays strict.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    ChapterViewRequest, CourseRepository, CourseRepositoryError, CourseViewQuery,
    ProgressCommand, ProgressRepository, ProgressRepositoryError, PurchaseRepository,
    PurchaseRepositoryError, RatingRepository, RatingRepositoryError, SetCompletionRequest,
    UserDirectory,
};
use crate::domain::views::{
    ChapterView, ChapterWithCompletion, CourseOverview, CourseSummary,
};
use crate::domain::{
    next_chapter, progress_percentage, Course, DirectoryUser, Error, UserId, UserProgress,
};

/// View assembly over the catalogue, purchase, progress, and rating stores
/// and the identity directory.
#[derive(Clone)]
pub struct CourseViewService<C, P, G, R, D> {
    course_repo: Arc<C>,
    purchase_repo: Arc<P>,
    progress_repo: Arc<G>,
    rating_repo: Arc<R>,
    directory: Arc<D>,
}

impl<C, P, G, R, D> CourseViewService<C, P, G, R, D> {
    /// Create a new service with the given repositories and directory.
    pub fn new(
        course_repo: Arc<C>,
        purchase_repo: Arc<P>,
        progress_repo: Arc<G>,
        rating_repo: Arc<R>,
        directory: Arc<D>,
    ) -> Self {
        Self {
            course_repo,
            purchase_repo,
            progress_repo,
            rating_repo,
            directory,
        }
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

fn map_purchase_error(error: PurchaseRepositoryError) -> Error {
    match error {
        PurchaseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("purchase repository unavailable: {message}"))
        }
        PurchaseRepositoryError::Query { message } => {
            Error::internal(format!("purchase repository error: {message}"))
        }
    }
}

fn map_progress_error(error: ProgressRepositoryError) -> Error {
    match error {
        ProgressRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("progress repository unavailable: {message}"))
        }
        ProgressRepositoryError::Query { message } => {
            Error::internal(format!("progress repository error: {message}"))
        }
    }
}

fn map_rating_error(error: RatingRepositoryError) -> Error {
    match error {
        RatingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("rating repository unavailable: {message}"))
        }
        RatingRepositoryError::Query { message } => {
            Error::internal(format!("rating repository error: {message}"))
        }
    }
}

impl<C, P, G, R, D> CourseViewService<C, P, G, R, D>
where
    C: CourseRepository,
    P: PurchaseRepository,
    G: ProgressRepository,
    R: RatingRepository,
    D: UserDirectory,
{
    /// Resolve the course owner's display fields; directory failures only
    /// cost the teacher card, never the page.
    async fn resolve_teacher(&self, owner_id: &UserId) -> Option<DirectoryUser> {
        match self.directory.find_user(owner_id).await {
            Ok(user) => user,
            Err(error) => {
                warn!(owner_id = %owner_id, %error, "directory lookup failed");
                None
            }
        }
    }

    async fn assemble_chapter_view(
        &self,
        request: &ChapterViewRequest,
    ) -> Result<ChapterView, Error> {
        let Some(course) = self
            .course_repo
            .find_published_course(request.course_id)
            .await
            .map_err(map_course_error)?
        else {
            return Ok(ChapterView::default());
        };
        let Some(chapter) = self
            .course_repo
            .find_published_chapter(request.course_id, request.chapter_id)
            .await
            .map_err(map_course_error)?
        else {
            return Ok(ChapterView::default());
        };

        let purchase = self
            .purchase_repo
            .find(&request.user_id, request.course_id)
            .await
            .map_err(map_purchase_error)?;
        let is_locked = chapter.is_locked(purchase.as_ref());

        let next = if is_locked {
            None
        } else {
            let chapters = self
                .course_repo
                .published_chapters(request.course_id)
                .await
                .map_err(map_course_error)?;
            next_chapter(&chapters, chapter.position).cloned()
        };

        let user_progress = self
            .progress_repo
            .find(&request.user_id, request.chapter_id)
            .await
            .map_err(map_progress_error)?;
        let has_rated = self
            .rating_repo
            .exists(&request.user_id, request.course_id)
            .await
            .map_err(map_rating_error)?;
        let teacher = self.resolve_teacher(&course.owner_id).await;

        Ok(ChapterView {
            chapter: Some(chapter),
            course: Some(course),
            next_chapter: next,
            user_progress,
            purchase,
            is_locked,
            has_rated,
            teacher,
        })
    }

    async fn summarise_course(
        &self,
        viewer_id: &UserId,
        course: Course,
    ) -> Result<CourseSummary, Error> {
        let published_chapter_count = self
            .course_repo
            .published_chapter_count(course.id)
            .await
            .map_err(map_course_error)?;
        let purchase = self
            .purchase_repo
            .find(viewer_id, course.id)
            .await
            .map_err(map_purchase_error)?;

        let progress = if purchase.is_some() {
            let completed = self
                .progress_repo
                .completed_chapter_ids(viewer_id, course.id)
                .await
                .map_err(map_progress_error)?;
            Some(progress_percentage(
                completed.len() as u64,
                published_chapter_count,
            ))
        } else {
            None
        };

        Ok(CourseSummary {
            course,
            published_chapter_count,
            progress,
        })
    }

    async fn assemble_instructor_courses(
        &self,
        viewer_id: &UserId,
        owner_id: &UserId,
    ) -> Result<Vec<CourseSummary>, Error> {
        let courses = self
            .course_repo
            .published_courses_owned_by(owner_id)
            .await
            .map_err(map_course_error)?;

        let mut summaries = Vec::with_capacity(courses.len());
        for course in courses {
            summaries.push(self.summarise_course(viewer_id, course).await?);
        }
        Ok(summaries)
    }
}

#[async_trait]
impl<C, P, G, R, D> CourseViewQuery for CourseViewService<C, P, G, R, D>
where
    C: CourseRepository,
    P: PurchaseRepository,
    G: ProgressRepository,
    R: RatingRepository,
    D: UserDirectory,
{
    async fn chapter_view(&self, request: ChapterViewRequest) -> Result<ChapterView, Error> {
        match self.assemble_chapter_view(&request).await {
            Ok(view) => Ok(view),
            Err(error) => {
                warn!(
                    course_id = %request.course_id,
                    chapter_id = %request.chapter_id,
                    error = %error.message(),
                    "chapter view assembly failed, returning empty shape"
                );
                Ok(ChapterView::default())
            }
        }
    }

    async fn course_overview(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<CourseOverview, Error> {
        let course = self
            .course_repo
            .find_published_course(course_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found("course not found"))?;
        let chapters = self
            .course_repo
            .published_chapters(course_id)
            .await
            .map_err(map_course_error)?;
        let purchase = self
            .purchase_repo
            .find(user_id, course_id)
            .await
            .map_err(map_purchase_error)?;

        let (completed, progress) = if purchase.is_some() {
            let completed = self
                .progress_repo
                .completed_chapter_ids(user_id, course_id)
                .await
                .map_err(map_progress_error)?;
            let percentage =
                progress_percentage(completed.len() as u64, chapters.len() as u64);
            (completed, Some(percentage))
        } else {
            (Vec::new(), None)
        };

        let teacher = self.resolve_teacher(&course.owner_id).await;
        let chapters = chapters
            .into_iter()
            .map(|chapter| {
                let is_completed = completed.contains(&chapter.id);
                ChapterWithCompletion {
                    chapter,
                    is_completed,
                }
            })
            .collect();

        Ok(CourseOverview {
            course,
            chapters,
            progress,
            teacher,
        })
    }

    async fn instructor_courses(
        &self,
        viewer_id: &UserId,
        owner_id: &UserId,
    ) -> Result<Vec<CourseSummary>, Error> {
        match self.assemble_instructor_courses(viewer_id, owner_id).await {
            Ok(summaries) => Ok(summaries),
            Err(error) => {
                warn!(
                    owner_id = %owner_id,
                    error = %error.message(),
                    "instructor course listing failed, returning empty list"
                );
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl<C, P, G, R, D> ProgressCommand for CourseViewService<C, P, G, R, D>
where
    C: CourseRepository,
    P: PurchaseRepository,
    G: ProgressRepository,
    R: RatingRepository,
    D: UserDirectory,
{
    async fn set_chapter_completion(
        &self,
        request: SetCompletionRequest,
    ) -> Result<UserProgress, Error> {
        self.course_repo
            .find_published_chapter(request.course_id, request.chapter_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found("chapter not found"))?;

        self.progress_repo
            .upsert(&request.user_id, request.chapter_id, request.is_completed)
            .await
            .map_err(map_progress_error)
    }
}
