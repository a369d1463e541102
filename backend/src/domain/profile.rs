//! Instructor profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Self-describing fields an instructor maintains, unique per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorProfile {
    pub user_id: UserId,
    pub bio: Option<String>,
    pub banner_image_url: Option<String>,
    pub cv_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Replacement field values for a profile upsert. Absent fields clear the
/// stored value, matching the original PATCH contract which always sends the
/// full editable set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub banner_image_url: Option<String>,
    pub cv_url: Option<String>,
}
