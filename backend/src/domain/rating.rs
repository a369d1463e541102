//! Course ratings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Validation errors returned by [`RatingScore::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RatingScoreValidationError {
    #[error("rating must be between {min} and {max}", min = RatingScore::MIN, max = RatingScore::MAX)]
    OutOfRange,
}

/// A star rating constrained to the 1..=5 range the clients render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct RatingScore(i16);

impl RatingScore {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 5;

    /// Validate and construct a score.
    pub fn try_new(value: i16) -> Result<Self, RatingScoreValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingScoreValidationError::OutOfRange)
        }
    }

    /// The raw score value.
    pub fn value(self) -> i16 {
        self.0
    }
}

impl From<RatingScore> for i16 {
    fn from(value: RatingScore) -> Self {
        value.0
    }
}

impl TryFrom<i16> for RatingScore {
    type Error = RatingScoreValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

/// A stored rating; append-only, unique per (user, course).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub user_id: UserId,
    pub course_id: Uuid,
    pub score: RatingScore,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A rating not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub user_id: UserId,
    pub course_id: Uuid,
    pub score: RatingScore,
    pub message: Option<String>,
}
