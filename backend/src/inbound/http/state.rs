//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle through `actix_web::web::Data` and depend
//! only on the driving-port trait objects, so every endpoint is testable
//! with fixtures or mocks.

use std::sync::Arc;

use crate::domain::ports::{
    CourseAccessQuery, CourseViewQuery, FixtureCourseAccessQuery, FixtureCourseViewQuery,
    FixtureProfileCommand, FixtureProfileQuery, FixtureProgressCommand, FixturePublishCommand,
    FixtureRatingCommand, FixtureUserDirectory, ProfileCommand, ProfileQuery, ProgressCommand,
    PublishCommand, RatingCommand, UserDirectory,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub access: Arc<dyn CourseAccessQuery>,
    pub ratings: Arc<dyn RatingCommand>,
    pub views: Arc<dyn CourseViewQuery>,
    pub progress: Arc<dyn ProgressCommand>,
    pub publish: Arc<dyn PublishCommand>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub profile_updates: Arc<dyn ProfileCommand>,
    pub directory: Arc<dyn UserDirectory>,
}

impl Default for HttpState {
    /// Fixture-backed state: an empty catalogue and a placeholder directory.
    fn default() -> Self {
        Self {
            access: Arc::new(FixtureCourseAccessQuery),
            ratings: Arc::new(FixtureRatingCommand),
            views: Arc::new(FixtureCourseViewQuery),
            progress: Arc::new(FixtureProgressCommand),
            publish: Arc::new(FixturePublishCommand),
            profiles: Arc::new(FixtureProfileQuery),
            profile_updates: Arc::new(FixtureProfileCommand),
            directory: Arc::new(FixtureUserDirectory),
        }
    }
}
