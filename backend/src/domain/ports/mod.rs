//! Domain ports: driven repository contracts and driving use-case traits.
//!
//! Adapters (Diesel, reqwest) implement the driven ports; domain services
//! implement the driving ports. Every port ships a fixture implementation so
//! handlers and services are testable without I/O.

mod course_repository;
mod profile_repository;
mod progress_repository;
mod purchase_repository;
mod rating_repository;
mod use_cases;
mod user_directory;

pub use course_repository::{CourseRepository, CourseRepositoryError, FixtureCourseRepository};
pub use profile_repository::{
    FixtureProfileRepository, ProfileRepository, ProfileRepositoryError,
};
pub use progress_repository::{
    FixtureProgressRepository, ProgressRepository, ProgressRepositoryError,
};
pub use purchase_repository::{
    FixturePurchaseRepository, PurchaseRepository, PurchaseRepositoryError,
};
pub use rating_repository::{
    FixtureRatingRepository, RatingInsert, RatingRepository, RatingRepositoryError,
};
pub use use_cases::{
    ChapterViewRequest, CourseAccessQuery, CourseViewQuery, FixtureCourseAccessQuery,
    FixtureCourseViewQuery, FixtureProfileCommand, FixtureProfileQuery, FixtureProgressCommand,
    FixturePublishCommand, FixtureRatingCommand, ProfileCommand, ProfileQuery, ProgressCommand,
    PublishCommand, RatingCommand, SetCompletionRequest, SubmitRatingRequest,
};
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};

#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use progress_repository::MockProgressRepository;
#[cfg(test)]
pub use purchase_repository::MockPurchaseRepository;
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
#[cfg(test)]
pub use use_cases::{
    MockCourseAccessQuery, MockCourseViewQuery, MockProfileCommand, MockProfileQuery,
    MockProgressCommand, MockPublishCommand, MockRatingCommand,
};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
