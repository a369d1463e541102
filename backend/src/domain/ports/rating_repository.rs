//! Port for course ratings.
//!
//! The write path is an atomic insert-if-absent: the adapter must resolve
//! concurrent duplicate submissions at the store, not with a prior existence
//! check. Adapters back this with the (user, course) unique constraint.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewRating, Rating, UserId};

/// Errors raised by rating repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatingRepositoryError {
    /// Repository connection could not be established.
    #[error("rating repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("rating repository query failed: {message}")]
    Query { message: String },
}

impl RatingRepositoryError {
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

/// Outcome of a conditional rating insert.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingInsert {
    /// The rating was stored.
    Inserted(Rating),
    /// A rating already existed for the (user, course) pair; nothing changed.
    AlreadyRated,
}

/// Port for rating existence checks and append-only inserts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Whether a rating exists for the (user, course) pair.
    async fn exists(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<bool, RatingRepositoryError>;

    /// Insert the rating unless one already exists for its unique key.
    async fn insert_if_absent(
        &self,
        rating: NewRating,
    ) -> Result<RatingInsert, RatingRepositoryError>;
}

/// Fixture implementation: nothing rated, every insert succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRatingRepository;

#[async_trait]
impl RatingRepository for FixtureRatingRepository {
    async fn exists(
        &self,
        _user_id: &UserId,
        _course_id: Uuid,
    ) -> Result<bool, RatingRepositoryError> {
        Ok(false)
    }

    async fn insert_if_absent(
        &self,
        rating: NewRating,
    ) -> Result<RatingInsert, RatingRepositoryError> {
        Ok(RatingInsert::Inserted(Rating {
            id: Uuid::new_v4(),
            user_id: rating.user_id,
            course_id: rating.course_id,
            score: rating.score,
            message: rating.message,
            created_at: chrono::Utc::now(),
        }))
    }
}
