//! Course endpoints: overview, rating eligibility, and rating submission.
//!
//! ```text
//! GET  /api/v1/courses/{courseId}
//! GET  /api/v1/courses/{courseId}/checkrate
//! POST /api/v1/courses/{courseId}/rating
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::SubmitRatingRequest;
use crate::domain::views::{CourseOverview, RatingEligibility};
use crate::domain::{Error, RatingScore};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Rating submission body for `POST /api/v1/courses/{courseId}/rating`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    /// Score in 1..=5.
    pub rating: i16,
    /// Optional free-text review.
    #[serde(default)]
    pub message: Option<String>,
}

/// Course overview: chapters in order, viewer progress, instructor card.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course overview"),
        (status = 401, description = "No session", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown or unpublished course", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseOverview"
)]
#[get("/courses/{course_id}")]
pub async fn course_overview(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<CourseOverview>> {
    let user_id = session.require_user_id()?;
    let overview = state
        .views
        .course_overview(&user_id, path.into_inner())
        .await?;
    Ok(web::Json(overview))
}

/// Rating eligibility for the current user.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/checkrate",
    params(("course_id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Eligibility flags"),
        (status = 401, description = "No session", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "checkRatingEligibility"
)]
#[get("/courses/{course_id}/checkrate")]
pub async fn check_rating_eligibility(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<RatingEligibility>> {
    let user_id = session.require_user_id()?;
    let eligibility = state
        .access
        .check_rating_eligibility(&user_id, path.into_inner())
        .await?;
    Ok(web::Json(eligibility))
}

/// Submit a rating; one per user per course.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{course_id}/rating",
    params(("course_id" = Uuid, Path, description = "Course identifier")),
    request_body = RatingRequest,
    responses(
        (status = 201, description = "Rating stored"),
        (status = 400, description = "Invalid score or already rated", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "No session", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "submitRating"
)]
#[post("/courses/{course_id}/rating")]
pub async fn submit_rating(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<RatingRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let score = RatingScore::try_new(payload.rating).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "rating", "code": "score_out_of_range" }))
    })?;

    state
        .ratings
        .submit_rating(SubmitRatingRequest {
            user_id,
            course_id: path.into_inner(),
            score,
            message: payload.message,
        })
        .await?;
    Ok(HttpResponse::Created().json(json!({ "message": "rating recorded" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRatingCommand;
    use crate::inbound::http::test_utils::test_session_middleware;
    use crate::inbound::http::users::{login, LoginRequest};
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(course_overview)
                    .service(check_rating_eligibility)
                    .service(submit_rating),
            )
    }

    async fn login_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    user_id: Uuid::new_v4().to_string(),
                })
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        res.response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn checkrate_reports_all_false_for_fresh_users() {
        let app = actix_test::init_service(test_app(HttpState::default())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/courses/{}/checkrate", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["hasPurchased"], false);
        assert_eq!(body["hasCompletedChapter"], false);
        assert_eq!(body["hasRated"], false);
    }

    #[rstest]
    #[case("/checkrate")]
    #[case("")]
    #[actix_web::test]
    async fn course_reads_require_a_session(#[case] suffix: &str) {
        let app = actix_test::init_service(test_app(HttpState::default())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/courses/{}{suffix}", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_course_overview_is_not_found() {
        let app = actix_test::init_service(test_app(HttpState::default())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/courses/{}", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn valid_rating_is_created() {
        let app = actix_test::init_service(test_app(HttpState::default())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{}/rating", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(RatingRequest {
                    rating: 5,
                    message: Some("superb".to_owned()),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[actix_web::test]
    async fn out_of_range_scores_are_rejected(#[case] rating: i16) {
        let app = actix_test::init_service(test_app(HttpState::default())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{}/rating", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(RatingRequest {
                    rating,
                    message: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "score_out_of_range");
    }

    #[actix_web::test]
    async fn duplicate_rating_maps_to_a_400_with_conflict_code() {
        let mut ratings = MockRatingCommand::new();
        ratings
            .expect_submit_rating()
            .return_once(|_| Err(Error::conflict("You have already rated this course")));
        let state = HttpState {
            ratings: Arc::new(ratings),
            ..HttpState::default()
        };
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{}/rating", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(RatingRequest {
                    rating: 4,
                    message: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "conflict");
    }
}
