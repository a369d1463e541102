//! Port for purchase lookups.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Purchase, UserId};

/// Errors raised by purchase repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseRepositoryError {
    /// Repository connection could not be established.
    #[error("purchase repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("purchase repository query failed: {message}")]
    Query { message: String },
}

impl PurchaseRepositoryError {
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

/// Port for reading purchases keyed by the (user, course) unique pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Fetch the purchase for a user and course, if any.
    async fn find(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<Option<Purchase>, PurchaseRepositoryError>;
}

/// Fixture implementation reporting no purchases.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePurchaseRepository;

#[async_trait]
impl PurchaseRepository for FixturePurchaseRepository {
    async fn find(
        &self,
        _user_id: &UserId,
        _course_id: Uuid,
    ) -> Result<Option<Purchase>, PurchaseRepositoryError> {
        Ok(None)
    }
}
