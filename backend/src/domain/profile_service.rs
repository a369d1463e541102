//! Public profile pages and self-service profile updates.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CourseViewQuery, ProfileCommand, ProfileQuery, ProfileRepository, ProfileRepositoryError,
    UserDirectory, UserDirectoryError,
};
use crate::domain::views::ProfilePage;
use crate::domain::{Error, InstructorProfile, ProfileUpdate, UserId};

/// Profile reads and writes over the profile store, the identity directory,
/// and the course view assembler.
#[derive(Clone)]
pub struct ProfileService<R, D> {
    profile_repo: Arc<R>,
    directory: Arc<D>,
    views: Arc<dyn CourseViewQuery>,
}

impl<R, D> ProfileService<R, D> {
    /// Create a new service with the given collaborators.
    pub fn new(profile_repo: Arc<R>, directory: Arc<D>, views: Arc<dyn CourseViewQuery>) -> Self {
        Self {
            profile_repo,
            directory,
            views,
        }
    }
}

fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
    }
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Unavailable { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Malformed { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

#[async_trait]
impl<R, D> ProfileQuery for ProfileService<R, D>
where
    R: ProfileRepository,
    D: UserDirectory,
{
    async fn profile_page(&self, user_id: &UserId) -> Result<ProfilePage, Error> {
        let user = self
            .directory
            .find_user(user_id)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        let profile = self
            .profile_repo
            .find_by_user_id(user_id)
            .await
            .map_err(map_profile_error)?;
        // The page viewer is the profile owner as far as progress is
        // concerned, so owned courses show the owner's own progress.
        let courses = self.views.instructor_courses(user_id, user_id).await?;

        let (bio, banner_image_url, cv_url) = match profile {
            Some(profile) => (profile.bio, profile.banner_image_url, profile.cv_url),
            None => (None, None, None),
        };

        Ok(ProfilePage {
            user,
            bio,
            banner_image_url,
            cv_url,
            courses,
        })
    }
}

#[async_trait]
impl<R, D> ProfileCommand for ProfileService<R, D>
where
    R: ProfileRepository,
    D: UserDirectory,
{
    async fn update_profile(
        &self,
        session_user: &UserId,
        target_user: &UserId,
        update: ProfileUpdate,
    ) -> Result<InstructorProfile, Error> {
        // The identity check happens before any store access.
        if session_user != target_user {
            return Err(Error::unauthorized(
                "profiles can only be edited by their owner",
            ));
        }

        self.profile_repo
            .upsert(target_user, update)
            .await
            .map_err(map_profile_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureCourseViewQuery, MockProfileRepository, MockUserDirectory,
    };
    use crate::domain::{DirectoryUser, ErrorCode};
    use chrono::Utc;

    fn make_service(
        profiles: MockProfileRepository,
        directory: MockUserDirectory,
    ) -> ProfileService<MockProfileRepository, MockUserDirectory> {
        ProfileService::new(
            Arc::new(profiles),
            Arc::new(directory),
            Arc::new(FixtureCourseViewQuery),
        )
    }

    fn directory_user(user_id: &UserId) -> DirectoryUser {
        DirectoryUser {
            id: user_id.clone(),
            full_name: "Grace Hopper".to_owned(),
            email: Some("grace@example.net".to_owned()),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn profile_page_merges_directory_and_stored_fields() {
        let user_id = UserId::random();
        let listed = directory_user(&user_id);
        let stored = InstructorProfile {
            user_id: user_id.clone(),
            bio: Some("Compilers and sea stories.".to_owned()),
            banner_image_url: None,
            cv_url: Some("https://example.net/cv.pdf".to_owned()),
            updated_at: Utc::now(),
        };

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .return_once(move |_| Ok(Some(stored)));
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_user()
            .return_once(move |_| Ok(Some(listed)));

        let page = make_service(profiles, directory)
            .profile_page(&user_id)
            .await
            .expect("page assembles");

        assert_eq!(page.user.full_name, "Grace Hopper");
        assert_eq!(page.bio.as_deref(), Some("Compilers and sea stories."));
        assert!(page.banner_image_url.is_none());
        assert!(page.courses.is_empty());
    }

    #[tokio::test]
    async fn profile_page_without_stored_profile_uses_empty_fields() {
        let user_id = UserId::random();
        let listed = directory_user(&user_id);

        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_by_user_id().return_once(|_| Ok(None));
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_user()
            .return_once(move |_| Ok(Some(listed)));

        let page = make_service(profiles, directory)
            .profile_page(&user_id)
            .await
            .expect("page assembles");

        assert!(page.bio.is_none());
        assert!(page.cv_url.is_none());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let mut directory = MockUserDirectory::new();
        directory.expect_find_user().return_once(|_| Ok(None));
        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_by_user_id().times(0);

        let error = make_service(profiles, directory)
            .profile_page(&UserId::random())
            .await
            .expect_err("missing user is an error");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn mismatched_identity_never_reaches_the_store() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_upsert().times(0);

        let error = make_service(profiles, MockUserDirectory::new())
            .update_profile(
                &UserId::random(),
                &UserId::random(),
                ProfileUpdate::default(),
            )
            .await
            .expect_err("rejected");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn owner_update_upserts_and_returns_the_profile() {
        let user_id = UserId::random();
        let update = ProfileUpdate {
            bio: Some("New bio".to_owned()),
            banner_image_url: Some("https://example.net/banner.png".to_owned()),
            cv_url: None,
        };

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_upsert()
            .return_once(|user_id: &UserId, update| {
                Ok(InstructorProfile {
                    user_id: user_id.clone(),
                    bio: update.bio,
                    banner_image_url: update.banner_image_url,
                    cv_url: update.cv_url,
                    updated_at: Utc::now(),
                })
            });

        let profile = make_service(profiles, MockUserDirectory::new())
            .update_profile(&user_id, &user_id, update)
            .await
            .expect("upsert succeeds");

        assert_eq!(profile.bio.as_deref(), Some("New bio"));
        assert!(profile.cv_url.is_none());
    }
}
