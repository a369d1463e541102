//! Access and eligibility evaluation plus rating submission.
//!
//! Purchase ownership, completion state, and rating existence are derived
//! from current row existence on every call, with no caching. The rating
//! write path is a single atomic insert-if-absent so concurrent duplicate
//! submissions cannot both land.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    CourseAccessQuery, ProgressRepository, ProgressRepositoryError, PurchaseRepository,
    PurchaseRepositoryError, RatingCommand, RatingInsert, RatingRepository,
    RatingRepositoryError, SubmitRatingRequest,
};
use crate::domain::views::RatingEligibility;
use crate::domain::{Error, NewRating, UserId};

/// Evaluator service over the purchase, progress, and rating stores.
#[derive(Clone)]
pub struct CourseAccessService<P, G, R> {
    purchase_repo: Arc<P>,
    progress_repo: Arc<G>,
    rating_repo: Arc<R>,
}

impl<P, G, R> CourseAccessService<P, G, R> {
    /// Create a new service with the given repositories.
    pub fn new(purchase_repo: Arc<P>, progress_repo: Arc<G>, rating_repo: Arc<R>) -> Self {
        Self {
            purchase_repo,
            progress_repo,
            rating_repo,
        }
    }
}

fn map_purchase_error(error: PurchaseRepositoryError) -> Error {
    match error {
        PurchaseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("purchase repository unavailable: {message}"))
        }
        PurchaseRepositoryError::Query { message } => {
            Error::internal(format!("purchase repository error: {message}"))
        }
    }
}

fn map_progress_error(error: ProgressRepositoryError) -> Error {
    match error {
        ProgressRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("progress repository unavailable: {message}"))
        }
        ProgressRepositoryError::Query { message } => {
            Error::internal(format!("progress repository error: {message}"))
        }
    }
}

fn map_rating_error(error: RatingRepositoryError) -> Error {
    match error {
        RatingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("rating repository unavailable: {message}"))
        }
        RatingRepositoryError::Query { message } => {
            Error::internal(format!("rating repository error: {message}"))
        }
    }
}

#[async_trait]
impl<P, G, R> CourseAccessQuery for CourseAccessService<P, G, R>
where
    P: PurchaseRepository,
    G: ProgressRepository,
    R: RatingRepository,
{
    async fn check_rating_eligibility(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<RatingEligibility, Error> {
        let purchase = self
            .purchase_repo
            .find(user_id, course_id)
            .await
            .map_err(map_purchase_error)?;

        // Without a purchase the remaining checks cannot change the answer.
        if purchase.is_none() {
            return Ok(RatingEligibility::default());
        }

        let has_completed_chapter = self
            .progress_repo
            .has_completed_any(user_id, course_id)
            .await
            .map_err(map_progress_error)?;
        let has_rated = self
            .rating_repo
            .exists(user_id, course_id)
            .await
            .map_err(map_rating_error)?;

        Ok(RatingEligibility {
            has_purchased: true,
            has_completed_chapter,
            has_rated,
        })
    }
}

#[async_trait]
impl<P, G, R> RatingCommand for CourseAccessService<P, G, R>
where
    P: PurchaseRepository,
    G: ProgressRepository,
    R: RatingRepository,
{
    async fn submit_rating(&self, request: SubmitRatingRequest) -> Result<(), Error> {
        let rating = NewRating {
            user_id: request.user_id,
            course_id: request.course_id,
            score: request.score,
            message: request.message,
        };

        match self
            .rating_repo
            .insert_if_absent(rating)
            .await
            .map_err(map_rating_error)?
        {
            RatingInsert::Inserted(_) => Ok(()),
            RatingInsert::AlreadyRated => Err(Error::conflict(
                "You have already rated this course",
            )
            .with_details(json!({ "code": "duplicate_rating" }))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockProgressRepository, MockPurchaseRepository, MockRatingRepository,
    };
    use crate::domain::{ErrorCode, Purchase, Rating, RatingScore};
    use chrono::Utc;

    fn make_service(
        purchases: MockPurchaseRepository,
        progress: MockProgressRepository,
        ratings: MockRatingRepository,
    ) -> CourseAccessService<MockPurchaseRepository, MockProgressRepository, MockRatingRepository>
    {
        CourseAccessService::new(Arc::new(purchases), Arc::new(progress), Arc::new(ratings))
    }

    fn purchase_for(user_id: &UserId, course_id: Uuid) -> Purchase {
        Purchase {
            id: Uuid::new_v4(),
            user_id: user_id.clone(),
            course_id,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn eligibility_short_circuits_without_purchase() {
        let user_id = UserId::random();
        let course_id = Uuid::new_v4();

        let mut purchases = MockPurchaseRepository::new();
        purchases.expect_find().times(1).return_once(|_, _| Ok(None));
        let mut progress = MockProgressRepository::new();
        progress.expect_has_completed_any().times(0);
        let mut ratings = MockRatingRepository::new();
        ratings.expect_exists().times(0);

        let service = make_service(purchases, progress, ratings);
        let eligibility = service
            .check_rating_eligibility(&user_id, course_id)
            .await
            .expect("check succeeds");

        assert_eq!(eligibility, RatingEligibility::default());
    }

    #[tokio::test]
    async fn eligibility_reports_completion_and_rating_state() {
        let user_id = UserId::random();
        let course_id = Uuid::new_v4();
        let owned = purchase_for(&user_id, course_id);

        let mut purchases = MockPurchaseRepository::new();
        purchases
            .expect_find()
            .times(1)
            .return_once(move |_, _| Ok(Some(owned)));
        let mut progress = MockProgressRepository::new();
        progress
            .expect_has_completed_any()
            .times(1)
            .return_once(|_, _| Ok(true));
        let mut ratings = MockRatingRepository::new();
        ratings.expect_exists().times(1).return_once(|_, _| Ok(false));

        let service = make_service(purchases, progress, ratings);
        let eligibility = service
            .check_rating_eligibility(&user_id, course_id)
            .await
            .expect("check succeeds");

        assert!(eligibility.has_purchased);
        assert!(eligibility.has_completed_chapter);
        assert!(!eligibility.has_rated);
    }

    #[tokio::test]
    async fn submit_rating_stores_new_rating() {
        let user_id = UserId::random();
        let course_id = Uuid::new_v4();
        let score = RatingScore::try_new(4).expect("valid score");

        let mut ratings = MockRatingRepository::new();
        ratings.expect_insert_if_absent().times(1).return_once(|rating| {
            Ok(RatingInsert::Inserted(Rating {
                id: Uuid::new_v4(),
                user_id: rating.user_id,
                course_id: rating.course_id,
                score: rating.score,
                message: rating.message,
                created_at: Utc::now(),
            }))
        });

        let service = make_service(
            MockPurchaseRepository::new(),
            MockProgressRepository::new(),
            ratings,
        );
        service
            .submit_rating(SubmitRatingRequest {
                user_id,
                course_id,
                score,
                message: Some("great".to_owned()),
            })
            .await
            .expect("submission succeeds");
    }

    #[tokio::test]
    async fn duplicate_rating_is_a_conflict() {
        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_insert_if_absent()
            .times(1)
            .return_once(|_| Ok(RatingInsert::AlreadyRated));

        let service = make_service(
            MockPurchaseRepository::new(),
            MockProgressRepository::new(),
            ratings,
        );
        let error = service
            .submit_rating(SubmitRatingRequest {
                user_id: UserId::random(),
                course_id: Uuid::new_v4(),
                score: RatingScore::try_new(5).expect("valid score"),
                message: None,
            })
            .await
            .expect_err("duplicate rejected");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let mut purchases = MockPurchaseRepository::new();
        purchases.expect_find().times(1).return_once(|_, _| {
            Err(PurchaseRepositoryError::connection("refused"))
        });

        let service = make_service(
            purchases,
            MockProgressRepository::new(),
            MockRatingRepository::new(),
        );
        let error = service
            .check_rating_eligibility(&UserId::random(), Uuid::new_v4())
            .await
            .expect_err("propagates");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
