//! Driving ports: the use cases the inbound adapters invoke.
//!
//! Domain services implement these traits; HTTP handlers depend only on the
//! trait objects so they stay testable with fixtures and mocks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::views::{
    ChapterView, CourseOverview, CourseSummary, ProfilePage, RatingEligibility,
};
use crate::domain::{
    Chapter, Error, InstructorProfile, ProfileUpdate, RatingScore, UserId, UserProgress,
};

/// Parameters for a chapter view fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterViewRequest {
    pub user_id: UserId,
    pub course_id: Uuid,
    pub chapter_id: Uuid,
}

/// Parameters for a rating submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRatingRequest {
    pub user_id: UserId,
    pub course_id: Uuid,
    pub score: RatingScore,
    pub message: Option<String>,
}

/// Parameters for toggling a chapter's completion flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCompletionRequest {
    pub user_id: UserId,
    pub course_id: Uuid,
    pub chapter_id: Uuid,
    pub is_completed: bool,
}

/// Rating-eligibility checks over purchase, progress, and rating state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseAccessQuery: Send + Sync {
    /// Evaluate purchase, completion, and rating existence for a course.
    async fn check_rating_eligibility(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<RatingEligibility, Error>;
}

/// Rating submission; one rating per user per course.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingCommand: Send + Sync {
    /// Store the rating; a duplicate yields a conflict error.
    async fn submit_rating(&self, request: SubmitRatingRequest) -> Result<(), Error>;
}

/// Read-side view assembly for pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseViewQuery: Send + Sync {
    /// Assemble the chapter page payload; fail-soft on store errors.
    async fn chapter_view(&self, request: ChapterViewRequest) -> Result<ChapterView, Error>;

    /// Assemble the course layout payload.
    async fn course_overview(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<CourseOverview, Error>;

    /// Published courses owned by `owner_id`, with the viewer's progress.
    async fn instructor_courses(
        &self,
        viewer_id: &UserId,
        owner_id: &UserId,
    ) -> Result<Vec<CourseSummary>, Error>;
}

/// Completion toggling from the player.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressCommand: Send + Sync {
    /// Upsert the viewer's completion flag for a chapter.
    async fn set_chapter_completion(
        &self,
        request: SetCompletionRequest,
    ) -> Result<UserProgress, Error>;
}

/// Instructor-side publication changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublishCommand: Send + Sync {
    /// Unpublish a chapter; unpublishes the course when it was the last
    /// published one. Only the course owner may call this.
    async fn unpublish_chapter(
        &self,
        user_id: &UserId,
        course_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<Chapter, Error>;
}

/// Public profile reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Assemble the profile page for any user id.
    async fn profile_page(&self, user_id: &UserId) -> Result<ProfilePage, Error>;
}

/// Profile self-service updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Upsert the caller's own profile; rejects mismatched identities.
    async fn update_profile(
        &self,
        session_user: &UserId,
        target_user: &UserId,
        update: ProfileUpdate,
    ) -> Result<InstructorProfile, Error>;
}

/// Fixture eligibility query: nothing purchased, completed, or rated.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseAccessQuery;

#[async_trait]
impl CourseAccessQuery for FixtureCourseAccessQuery {
    async fn check_rating_eligibility(
        &self,
        _user_id: &UserId,
        _course_id: Uuid,
    ) -> Result<RatingEligibility, Error> {
        Ok(RatingEligibility::default())
    }
}

/// Fixture rating command that accepts every submission.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRatingCommand;

#[async_trait]
impl RatingCommand for FixtureRatingCommand {
    async fn submit_rating(&self, _request: SubmitRatingRequest) -> Result<(), Error> {
        Ok(())
    }
}

/// Fixture view query over an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseViewQuery;

#[async_trait]
impl CourseViewQuery for FixtureCourseViewQuery {
    async fn chapter_view(&self, _request: ChapterViewRequest) -> Result<ChapterView, Error> {
        Ok(ChapterView::default())
    }

    async fn course_overview(
        &self,
        _user_id: &UserId,
        _course_id: Uuid,
    ) -> Result<CourseOverview, Error> {
        Err(Error::not_found("course not found"))
    }

    async fn instructor_courses(
        &self,
        _viewer_id: &UserId,
        _owner_id: &UserId,
    ) -> Result<Vec<CourseSummary>, Error> {
        Ok(Vec::new())
    }
}

/// Fixture progress command that echoes the requested state.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProgressCommand;

#[async_trait]
impl ProgressCommand for FixtureProgressCommand {
    async fn set_chapter_completion(
        &self,
        request: SetCompletionRequest,
    ) -> Result<UserProgress, Error> {
        Ok(UserProgress {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            chapter_id: request.chapter_id,
            is_completed: request.is_completed,
            updated_at: chrono::Utc::now(),
        })
    }
}

/// Fixture publish command over an empty catalogue; nothing is owned.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePublishCommand;

#[async_trait]
impl PublishCommand for FixturePublishCommand {
    async fn unpublish_chapter(
        &self,
        _user_id: &UserId,
        _course_id: Uuid,
        _chapter_id: Uuid,
    ) -> Result<Chapter, Error> {
        Err(Error::unauthorized("course is not owned by the caller"))
    }
}

/// Fixture profile query over an empty directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileQuery;

#[async_trait]
impl ProfileQuery for FixtureProfileQuery {
    async fn profile_page(&self, _user_id: &UserId) -> Result<ProfilePage, Error> {
        Err(Error::not_found("user not found"))
    }
}

/// Fixture profile command that echoes the update after the identity check.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileCommand;

#[async_trait]
impl ProfileCommand for FixtureProfileCommand {
    async fn update_profile(
        &self,
        session_user: &UserId,
        target_user: &UserId,
        update: ProfileUpdate,
    ) -> Result<InstructorProfile, Error> {
        if session_user != target_user {
            return Err(Error::unauthorized("profiles can only be edited by their owner"));
        }
        Ok(InstructorProfile {
            user_id: target_user.clone(),
            bio: update.bio,
            banner_image_url: update.banner_image_url,
            cv_url: update.cv_url,
            updated_at: chrono::Utc::now(),
        })
    }
}
