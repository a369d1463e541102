//! Builders for the HTTP state ports.
//!
//! A configured database pool selects the Diesel-backed services; without one
//! every port falls back to its fixture, which only makes sense in tests.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use crate::domain::ports::UserDirectory;
use crate::domain::{CourseAccessService, CourseViewService, ProfileService, PublishService};
use crate::inbound::http::state::HttpState;
use crate::outbound::directory::HttpUserDirectory;
use crate::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselProfileRepository, DieselProgressRepository,
    DieselPurchaseRepository, DieselRatingRepository,
};

use super::ServerConfig;

const DIRECTORY_TIMEOUT: Duration = Duration::from_secs(10);

fn build_pool_backed_state<D>(pool: &DbPool, directory: Arc<D>) -> HttpState
where
    D: UserDirectory + 'static,
{
    let courses = Arc::new(DieselCourseRepository::new(pool.clone()));
    let purchases = Arc::new(DieselPurchaseRepository::new(pool.clone()));
    let progress = Arc::new(DieselProgressRepository::new(pool.clone()));
    let ratings = Arc::new(DieselRatingRepository::new(pool.clone()));
    let profiles = Arc::new(DieselProfileRepository::new(pool.clone()));

    let access = Arc::new(CourseAccessService::new(
        purchases.clone(),
        progress.clone(),
        ratings.clone(),
    ));
    let views = Arc::new(CourseViewService::new(
        courses.clone(),
        purchases,
        progress,
        ratings,
        directory.clone(),
    ));
    let publish = Arc::new(PublishService::new(courses));
    let profile_service = Arc::new(ProfileService::new(
        profiles,
        directory.clone(),
        views.clone(),
    ));

    HttpState {
        access: access.clone(),
        ratings: access,
        views: views.clone(),
        progress: views,
        publish,
        profiles: profile_service.clone(),
        profile_updates: profile_service,
        directory,
    }
}

fn build_state<D>(config: &ServerConfig, directory: Arc<D>) -> HttpState
where
    D: UserDirectory + 'static,
{
    match &config.db_pool {
        Some(pool) => build_pool_backed_state(pool, directory),
        None => HttpState {
            directory,
            ..HttpState::default()
        },
    }
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
///
/// # Errors
///
/// Fails when the directory HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let state = match &config.directory_url {
        Some(url) => {
            let directory = HttpUserDirectory::new(url.clone(), DIRECTORY_TIMEOUT)
                .map_err(|err| std::io::Error::other(format!("directory client failed: {err}")))?;
            build_state(config, Arc::new(directory))
        }
        None => build_state(
            config,
            Arc::new(crate::domain::ports::FixtureUserDirectory),
        ),
    };
    Ok(web::Data::new(state))
}
