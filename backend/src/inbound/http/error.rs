//! HTTP mapping for domain errors.
//!
//! The domain [`Error`] carries no transport knowledge; this module decides
//! status codes and the JSON body shape. Internal errors are redacted before
//! leaving the process.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        // Duplicate submissions travel as plain 400 on the wire; the body
        // code keeps them machine-distinguishable.
        ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redacted(error: &Error) -> Error {
    if error.code() == ErrorCode::InternalError {
        let mut clean = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            clean = clean.with_trace_id(id.to_owned());
        }
        clean
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(message = %self.message(), "internal error returned to client");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header(("trace-id", id.to_owned()));
        }
        builder.json(redacted(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Framework errors carry implementation detail; log and flatten.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("who"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("no"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("dup"), StatusCode::BAD_REQUEST)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_expected_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn conflicts_keep_their_body_code_on_a_400() {
        let response = Error::conflict("You have already rated this course").error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["code"], "conflict");
        assert_eq!(value["message"], "You have already rated this course");
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let response = Error::internal("connection string was postgres://secret").error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn trace_id_travels_in_header_and_body() {
        let response = Error::not_found("missing").with_trace_id("abc").error_response();
        assert_eq!(
            response.headers().get("trace-id").expect("header"),
            "abc"
        );
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["traceId"], "abc");
    }
}
