//! Port for per-user chapter completion state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{UserId, UserProgress};

/// Errors raised by progress repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressRepositoryError {
    /// Repository connection could not be established.
    #[error("progress repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("progress repository query failed: {message}")]
    Query { message: String },
}

impl ProgressRepositoryError {
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

/// Port for completion rows keyed by the (user, chapter) unique pair.
///
/// Counting operations only consider *published* chapters of the course so
/// the aggregator never mixes draft content into a percentage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the progress row for a user and chapter, if any.
    async fn find(
        &self,
        user_id: &UserId,
        chapter_id: Uuid,
    ) -> Result<Option<UserProgress>, ProgressRepositoryError>;

    /// Ids of published chapters of the course the user has completed.
    async fn completed_chapter_ids(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<Vec<Uuid>, ProgressRepositoryError>;

    /// Whether the user has completed at least one published chapter of the
    /// course.
    async fn has_completed_any(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<bool, ProgressRepositoryError>;

    /// Insert or update the completion flag for a (user, chapter) pair.
    async fn upsert(
        &self,
        user_id: &UserId,
        chapter_id: Uuid,
        is_completed: bool,
    ) -> Result<UserProgress, ProgressRepositoryError>;
}

/// Fixture implementation with no recorded progress; upserts echo the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProgressRepository;

#[async_trait]
impl ProgressRepository for FixtureProgressRepository {
    async fn find(
        &self,
        _user_id: &UserId,
        _chapter_id: Uuid,
    ) -> Result<Option<UserProgress>, ProgressRepositoryError> {
        Ok(None)
    }

    async fn completed_chapter_ids(
        &self,
        _user_id: &UserId,
        _course_id: Uuid,
    ) -> Result<Vec<Uuid>, ProgressRepositoryError> {
        Ok(Vec::new())
    }

    async fn has_completed_any(
        &self,
        _user_id: &UserId,
        _course_id: Uuid,
    ) -> Result<bool, ProgressRepositoryError> {
        Ok(false)
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        chapter_id: Uuid,
        is_completed: bool,
    ) -> Result<UserProgress, ProgressRepositoryError> {
        Ok(UserProgress {
            id: Uuid::new_v4(),
            user_id: user_id.clone(),
            chapter_id,
            is_completed,
            updated_at: chrono::Utc::now(),
        })
    }
}
