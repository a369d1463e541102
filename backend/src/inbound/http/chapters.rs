//! Chapter endpoints: the player view, completion toggling, and unpublish.
//!
//! ```text
//! GET   /api/v1/courses/{courseId}/chapters/{chapterId}
//! PUT   /api/v1/courses/{courseId}/chapters/{chapterId}/progress
//! PATCH /api/v1/courses/{courseId}/chapters/{chapterId}/unpublish
//! ```

use actix_web::{get, patch, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{ChapterViewRequest, SetCompletionRequest};
use crate::domain::views::ChapterView;
use crate::domain::{Error, UserProgress};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Body for `PUT .../progress`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    pub is_completed: bool,
}

/// Everything the chapter page needs in one response.
///
/// The assembler degrades to an empty shape on store failure; an incomplete
/// shape (missing chapter or course) becomes 404 here rather than a 500.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/chapters/{chapter_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course identifier"),
        ("chapter_id" = Uuid, Path, description = "Chapter identifier")
    ),
    responses(
        (status = 200, description = "Chapter view"),
        (status = 401, description = "No session", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown chapter, or assembly degraded", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["chapters"],
    operation_id = "chapterView"
)]
#[get("/courses/{course_id}/chapters/{chapter_id}")]
pub async fn chapter_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<web::Json<ChapterView>> {
    let user_id = session.require_user_id()?;
    let (course_id, chapter_id) = path.into_inner();
    let view = state
        .views
        .chapter_view(ChapterViewRequest {
            user_id,
            course_id,
            chapter_id,
        })
        .await?;
    if !view.is_complete() {
        return Err(Error::not_found("chapter not found"));
    }
    Ok(web::Json(view))
}

/// Toggle the viewer's completion flag for a chapter.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{course_id}/chapters/{chapter_id}/progress",
    params(
        ("course_id" = Uuid, Path, description = "Course identifier"),
        ("chapter_id" = Uuid, Path, description = "Chapter identifier")
    ),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Updated progress row"),
        (status = 401, description = "No session", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown chapter", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["chapters"],
    operation_id = "setChapterCompletion"
)]
#[put("/courses/{course_id}/chapters/{chapter_id}/progress")]
pub async fn set_chapter_completion(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<ProgressRequest>,
) -> ApiResult<web::Json<UserProgress>> {
    let user_id = session.require_user_id()?;
    let (course_id, chapter_id) = path.into_inner();
    let progress = state
        .progress
        .set_chapter_completion(SetCompletionRequest {
            user_id,
            course_id,
            chapter_id,
            is_completed: payload.is_completed,
        })
        .await?;
    Ok(web::Json(progress))
}

/// Withdraw a chapter from publication; owner only. Unpublishing the last
/// published chapter unpublishes the course.
#[utoipa::path(
    patch,
    path = "/api/v1/courses/{course_id}/chapters/{chapter_id}/unpublish",
    params(
        ("course_id" = Uuid, Path, description = "Course identifier"),
        ("chapter_id" = Uuid, Path, description = "Chapter identifier")
    ),
    responses(
        (status = 200, description = "Updated chapter"),
        (status = 401, description = "No session or not the owner", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown chapter", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["chapters"],
    operation_id = "unpublishChapter"
)]
#[patch("/courses/{course_id}/chapters/{chapter_id}/unpublish")]
pub async fn unpublish_chapter(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let (course_id, chapter_id) = path.into_inner();
    let chapter = state
        .publish
        .unpublish_chapter(&user_id, course_id, chapter_id)
        .await?;
    Ok(HttpResponse::Ok().json(chapter))
}
