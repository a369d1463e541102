//! Session and identity endpoints.
//!
//! ```text
//! POST /api/v1/login  {"userId":"3fa85f64-..."}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! ```
//!
//! Login accepts a directory user id and establishes the cookie session.
//! Credential verification lives with the external identity provider; this
//! backend only records which directory user the session belongs to.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::UserDirectoryError;
use crate::domain::{DirectoryUser, Error, UserId, UserIdValidationError};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Directory user id the session should be bound to.
    pub user_id: String,
}

fn map_user_id_error(err: UserIdValidationError) -> Error {
    let code = match err {
        UserIdValidationError::Empty => "empty_user_id",
        UserIdValidationError::Invalid => "invalid_user_id",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "userId", "code": code }))
}

fn map_directory_error(err: UserDirectoryError) -> Error {
    match err {
        UserDirectoryError::Unavailable { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Malformed { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

/// Establish a session for a directory user.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown user", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(&payload.user_id).map_err(map_user_id_error)?;
    state
        .directory
        .find_user(&user_id)
        .await
        .map_err(map_directory_error)?
        .ok_or_else(|| Error::not_found("user not found"))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Drop the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Display fields of the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Authenticated user"),
        (status = 401, description = "No session", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "User no longer in the directory", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DirectoryUser>> {
    let user_id = session.require_user_id()?;
    let user = state
        .directory
        .find_user(&user_id)
        .await
        .map_err(map_directory_error)?
        .ok_or_else(|| Error::not_found("user not found"))?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::Value;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::default()))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(logout)
                    .service(me),
            )
    }

    pub(crate) async fn login_cookie(
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
                    user_id: uuid::Uuid::new_v4().to_string(),
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
    async fn login_rejects_a_malformed_user_id() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    user_id: "not-a-uuid".to_owned(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], "userId");
    }

    #[actix_web::test]
    async fn me_reflects_the_logged_in_user() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["fullName"], "Ada Lovelace");
    }

    #[actix_web::test]
    async fn me_requires_a_session() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_invalidates_the_session() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
        let cleared = logout_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("removal cookie")
            .into_owned();

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
