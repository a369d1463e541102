//! Core domain: catalogue types, access rules, and the services that
//! implement the use cases behind the HTTP surface.

mod access_service;
mod course;
mod error;
pub mod ports;
mod profile;
mod profile_service;
mod progress;
mod publish_service;
mod rating;
mod user;
mod view_service;
pub mod views;

pub use access_service::CourseAccessService;
pub use course::{next_chapter, Chapter, Course, Purchase, UserProgress};
pub use error::{Error, ErrorCode};
pub use profile::{InstructorProfile, ProfileUpdate};
pub use profile_service::ProfileService;
pub use progress::progress_percentage;
pub use publish_service::PublishService;
pub use rating::{NewRating, Rating, RatingScore, RatingScoreValidationError};
pub use user::{DirectoryUser, UserId, UserIdValidationError};
pub use view_service::CourseViewService;
