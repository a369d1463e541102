//! Port for instructor profile persistence.

use async_trait::async_trait;

use crate::domain::{InstructorProfile, ProfileUpdate, UserId};

/// Errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileRepositoryError {
    /// Repository connection could not be established.
    #[error("profile repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("profile repository query failed: {message}")]
    Query { message: String },
}

impl ProfileRepositoryError {
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

/// Port for profiles keyed by user id.
///
/// `upsert` must be atomic at the store so two concurrent PATCHes cannot
/// race a check-then-insert into a duplicate key failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile for a user, if any.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<InstructorProfile>, ProfileRepositoryError>;

    /// Insert or replace the editable profile fields.
    async fn upsert(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<InstructorProfile, ProfileRepositoryError>;
}

/// Fixture implementation with no stored profiles; upserts echo the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find_by_user_id(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<InstructorProfile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<InstructorProfile, ProfileRepositoryError> {
        Ok(InstructorProfile {
            user_id: user_id.clone(),
            bio: update.bio,
            banner_image_url: update.banner_image_url,
            cv_url: update.cv_url,
            updated_at: chrono::Utc::now(),
        })
    }
}
