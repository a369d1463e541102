//! Display-ready view models assembled for the pages.
//!
//! These are the shapes the frontend consumes; they carry already-evaluated
//! access decisions so templates never re-derive gating rules.

use serde::{Deserialize, Serialize};

use crate::domain::{Chapter, Course, DirectoryUser, Purchase, UserProgress};

/// Everything the chapter page needs in one fetch.
///
/// The all-`None` default shape is the fail-soft contract: when assembly hits
/// a store failure the caller receives this instead of an error, and decides
/// how to degrade (the HTTP adapter replies 404 when `chapter` or `course`
/// is absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterView {
    pub chapter: Option<Chapter>,
    pub course: Option<Course>,
    /// Next published chapter by position; withheld while the chapter is
    /// locked so the player cannot skip ahead of the paywall.
    pub next_chapter: Option<Chapter>,
    pub user_progress: Option<UserProgress>,
    pub purchase: Option<Purchase>,
    pub is_locked: bool,
    pub has_rated: bool,
    /// Instructor display fields from the directory, when resolvable.
    pub teacher: Option<DirectoryUser>,
}

impl ChapterView {
    /// True when the essential records are present.
    pub fn is_complete(&self) -> bool {
        self.chapter.is_some() && self.course.is_some()
    }
}

/// A published chapter annotated with the viewer's completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterWithCompletion {
    pub chapter: Chapter,
    pub is_completed: bool,
}

/// Course layout data: ordered chapters, viewer progress, instructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOverview {
    pub course: Course,
    pub chapters: Vec<ChapterWithCompletion>,
    /// Percentage in [0, 100]; `None` when the viewer holds no purchase.
    pub progress: Option<u8>,
    pub teacher: Option<DirectoryUser>,
}

/// One row of an instructor's course list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub course: Course,
    pub published_chapter_count: u64,
    /// `None` when the viewer has not purchased this course.
    pub progress: Option<u8>,
}

/// Public profile page: directory fields plus published courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePage {
    pub user: DirectoryUser,
    pub bio: Option<String>,
    pub banner_image_url: Option<String>,
    pub cv_url: Option<String>,
    pub courses: Vec<CourseSummary>,
}

/// Outcome of the rating-eligibility check for a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingEligibility {
    pub has_purchased: bool,
    pub has_completed_chapter: bool,
    pub has_rated: bool,
}
