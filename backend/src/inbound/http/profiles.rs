//! Instructor profile endpoints.
//!
//! ```text
//! GET   /api/v1/profile/{userId}
//! PATCH /api/v1/profile/{userId}
//! ```

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::views::ProfilePage;
use crate::domain::{Error, InstructorProfile, ProfileUpdate, UserId, UserIdValidationError};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Body for `PATCH /api/v1/profile/{userId}`.
///
/// The client always sends the full editable set; absent fields clear the
/// stored values.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub cv_url: Option<String>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(value: ProfileUpdateRequest) -> Self {
        Self {
            bio: value.bio,
            banner_image_url: value.banner_image_url,
            cv_url: value.cv_url,
        }
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        let code = match err {
            UserIdValidationError::Empty => "empty_user_id",
            UserIdValidationError::Invalid => "invalid_user_id",
        };
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "userId", "code": code }))
    })
}

/// Public profile page: directory fields plus published courses.
#[utoipa::path(
    get,
    path = "/api/v1/profile/{user_id}",
    params(("user_id" = String, Path, description = "Profile owner's user id")),
    responses(
        (status = 200, description = "Profile page"),
        (status = 401, description = "No session", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown user", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "profilePage"
)]
#[get("/profile/{user_id}")]
pub async fn profile_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfilePage>> {
    session.require_user_id()?;
    let target = parse_user_id(&path.into_inner())?;
    let page = state.profiles.profile_page(&target).await?;
    Ok(web::Json(page))
}

/// Update the caller's own profile.
#[utoipa::path(
    patch,
    path = "/api/v1/profile/{user_id}",
    params(("user_id" = String, Path, description = "Profile owner's user id")),
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile"),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "No session, or editing another user's profile", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "updateProfile"
)]
#[patch("/profile/{user_id}")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<InstructorProfile>> {
    let session_user = session.require_user_id()?;
    let target = parse_user_id(&path.into_inner())?;
    let profile = state
        .profile_updates
        .update_profile(&session_user, &target, payload.into_inner().into())
        .await?;
    Ok(web::Json(profile))
}
