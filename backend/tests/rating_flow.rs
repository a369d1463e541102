//! End-to-end rating flow over the HTTP layer with an in-memory store.
//!
//! Exercises the full path from session establishment through eligibility
//! checks to the single-rating guarantee, without a database.

use std::sync::{Arc, Mutex};

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use backend::domain::ports::{
    FixtureProgressRepository, PurchaseRepository, PurchaseRepositoryError, RatingInsert,
    RatingRepository, RatingRepositoryError,
};
use backend::domain::{CourseAccessService, NewRating, Purchase, Rating, UserId};
use backend::inbound::http::courses::{check_rating_eligibility, submit_rating};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::login;

/// Purchase store where every user owns every course.
#[derive(Debug, Default, Clone, Copy)]
struct AllPurchasedRepository;

#[async_trait]
impl PurchaseRepository for AllPurchasedRepository {
    async fn find(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<Option<Purchase>, PurchaseRepositoryError> {
        Ok(Some(Purchase {
            id: Uuid::new_v4(),
            user_id: user_id.clone(),
            course_id,
            created_at: chrono::Utc::now(),
        }))
    }
}

/// Rating store guarding the (user, course) unique pair behind one lock, the
/// way the SQL constraint does.
#[derive(Debug, Default)]
struct InMemoryRatingRepository {
    rows: Mutex<Vec<Rating>>,
}

impl InMemoryRatingRepository {
    fn row_count(&self) -> usize {
        self.rows.lock().expect("rating store lock").len()
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn exists(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<bool, RatingRepositoryError> {
        let rows = self.rows.lock().expect("rating store lock");
        Ok(rows
            .iter()
            .any(|row| &row.user_id == user_id && row.course_id == course_id))
    }

    async fn insert_if_absent(
        &self,
        rating: NewRating,
    ) -> Result<RatingInsert, RatingRepositoryError> {
        let mut rows = self.rows.lock().expect("rating store lock");
        let duplicate = rows
            .iter()
            .any(|row| row.user_id == rating.user_id && row.course_id == rating.course_id);
        if duplicate {
            return Ok(RatingInsert::AlreadyRated);
        }
        let stored = Rating {
            id: Uuid::new_v4(),
            user_id: rating.user_id,
            course_id: rating.course_id,
            score: rating.score,
            message: rating.message,
            created_at: chrono::Utc::now(),
        };
        rows.push(stored.clone());
        Ok(RatingInsert::Inserted(stored))
    }
}

fn rating_state(ratings: Arc<InMemoryRatingRepository>) -> HttpState {
    let access = Arc::new(CourseAccessService::new(
        Arc::new(AllPurchasedRepository),
        Arc::new(FixtureProgressRepository),
        ratings,
    ));
    HttpState {
        access: access.clone(),
        ratings: access,
        ..HttpState::default()
    }
}

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
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(session)
        .service(
            web::scope("/api/v1")
                .service(login)
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
            .set_json(json!({ "userId": Uuid::new_v4().to_string() }))
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
async fn rating_lifecycle_enforces_one_rating_per_course() {
    let ratings = Arc::new(InMemoryRatingRepository::default());
    let app = actix_test::init_service(test_app(rating_state(ratings.clone()))).await;
    let cookie = login_cookie(&app).await;
    let course_id = Uuid::new_v4();

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}/checkrate"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["hasPurchased"], true);
    assert_eq!(body["hasRated"], false);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/rating"))
            .cookie(cookie.clone())
            .set_json(json!({ "rating": 5, "message": "superb" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(ratings.row_count(), 1);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}/checkrate"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["hasRated"], true);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/rating"))
            .cookie(cookie)
            .set_json(json!({ "rating": 3 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["details"]["code"], "duplicate_rating");
    assert_eq!(ratings.row_count(), 1);
}

#[actix_web::test]
async fn ratings_from_different_users_are_kept_apart() {
    let ratings = Arc::new(InMemoryRatingRepository::default());
    let app = actix_test::init_service(test_app(rating_state(ratings.clone()))).await;
    let course_id = Uuid::new_v4();

    for score in [4, 5] {
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{course_id}/rating"))
                .cookie(cookie)
                .set_json(json!({ "rating": score }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
    assert_eq!(ratings.row_count(), 2);
}
