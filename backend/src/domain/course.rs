//! Course catalogue aggregates.
//!
//! Plain typed records as loaded from persistence. Publication gating and
//! ordering rules live here so services and adapters share one definition of
//! "published" and "next chapter".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// A course owned by an instructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    /// The instructor who owns and publishes the course.
    pub owner_id: UserId,
    pub title: String,
    /// Price in minor currency units; `None` while the course is unpriced.
    pub price_cents: Option<i32>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// A single chapter within a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    /// Ordering key within the course; lower positions come first.
    pub position: i32,
    pub is_published: bool,
    /// Free-preview chapters are viewable without a purchase.
    pub is_free: bool,
}

/// Proof of purchase; existence implies full course access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: Uuid,
    pub user_id: UserId,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Per-user completion flag for one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: Uuid,
    pub user_id: UserId,
    pub chapter_id: Uuid,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl Chapter {
    /// A chapter is locked when it is not a free preview and the viewer holds
    /// no purchase for its course.
    pub fn is_locked(&self, purchase: Option<&Purchase>) -> bool {
        !self.is_free && purchase.is_none()
    }
}

/// Select the next chapter after `position`: the minimal-position published
/// chapter strictly greater than the current one, or `None` when the course
/// ends here. `chapters` may arrive in any order.
pub fn next_chapter(chapters: &[Chapter], position: i32) -> Option<&Chapter> {
    chapters
        .iter()
        .filter(|chapter| chapter.is_published && chapter.position > position)
        .min_by_key(|chapter| chapter.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn chapter(position: i32, is_published: bool) -> Chapter {
        Chapter {
            id: Uuid::new_v4(),
            course_id: Uuid::nil(),
            title: format!("Chapter {position}"),
            position,
            is_published,
            is_free: false,
        }
    }

    fn purchase() -> Purchase {
        Purchase {
            id: Uuid::new_v4(),
            user_id: UserId::random(),
            course_id: Uuid::nil(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(false, false, true)]
    #[case(false, true, false)]
    #[case(true, false, false)]
    #[case(true, true, false)]
    fn lock_requires_no_preview_and_no_purchase(
        #[case] is_free: bool,
        #[case] has_purchase: bool,
        #[case] expected: bool,
    ) {
        let mut subject = chapter(1, true);
        subject.is_free = is_free;
        let owned = purchase();
        let held = has_purchase.then_some(&owned);
        assert_eq!(subject.is_locked(held), expected);
    }

    #[rstest]
    fn next_chapter_picks_minimal_following_position() {
        let chapters = vec![chapter(4, true), chapter(1, true), chapter(3, true)];
        let next = next_chapter(&chapters, 1).expect("has next");
        assert_eq!(next.position, 3);
    }

    #[rstest]
    fn next_chapter_skips_unpublished() {
        let chapters = vec![chapter(2, false), chapter(3, true)];
        let next = next_chapter(&chapters, 1).expect("has next");
        assert_eq!(next.position, 3);
    }

    #[rstest]
    fn next_chapter_is_none_at_the_end() {
        let chapters = vec![chapter(1, true), chapter(2, true)];
        assert!(next_chapter(&chapters, 2).is_none());
    }
}
