//! Diesel row structs and their conversions into domain types.
//!
//! Rows are internal to the persistence layer; the domain only ever sees the
//! converted types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Chapter, Course, InstructorProfile, Purchase, Rating, RatingScore,
    RatingScoreValidationError, UserId, UserProgress,
};

use super::schema::{chapters, courses, profiles, purchases, ratings, user_progress};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub price_cents: Option<i32>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: row.id,
            owner_id: UserId::from_uuid(row.user_id),
            title: row.title,
            price_cents: row.price_cents,
            is_published: row.is_published,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = chapters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChapterRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub position: i32,
    pub is_published: bool,
    pub is_free: bool,
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            title: row.title,
            position: row.position,
            is_published: row.is_published,
            is_free: row.is_free,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = purchases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PurchaseRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<PurchaseRow> for Purchase {
    fn from(row: PurchaseRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            course_id: row.course_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = user_progress)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserProgressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub chapter_id: Uuid,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProgressRow> for UserProgress {
    fn from(row: UserProgressRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            chapter_id: row.chapter_id,
            is_completed: row.is_completed,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = user_progress)]
pub struct NewUserProgressRow {
    pub user_id: Uuid,
    pub chapter_id: Uuid,
    pub is_completed: bool,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RatingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub score: i16,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RatingRow> for Rating {
    type Error = RatingScoreValidationError;

    /// The database constraint admits any smallint; the domain does not.
    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            course_id: row.course_id,
            score: RatingScore::try_new(row.score)?,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = ratings)]
pub struct NewRatingRow {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub score: i16,
    pub message: Option<String>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub banner_image_url: Option<String>,
    pub cv_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for InstructorProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.user_id),
            bio: row.bio,
            banner_image_url: row.banner_image_url,
            cv_url: row.cv_url,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = profiles)]
pub struct ProfileUpsertRow {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub banner_image_url: Option<String>,
    pub cv_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn course_row_converts_owner_to_user_id() {
        let owner = Uuid::new_v4();
        let row = CourseRow {
            id: Uuid::new_v4(),
            user_id: owner,
            title: "A Course".to_owned(),
            price_cents: None,
            is_published: true,
            created_at: Utc::now(),
        };
        let course = Course::from(row);
        assert_eq!(course.owner_id.as_uuid(), &owner);
    }

    #[rstest]
    fn rating_row_with_stray_score_is_rejected() {
        let row = RatingRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            score: 9,
            message: None,
            created_at: Utc::now(),
        };
        assert!(Rating::try_from(row).is_err());
    }
}
