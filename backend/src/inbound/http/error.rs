//! Domain errors rendered as HTTP responses.
//!
//! Only this module knows status codes. Internal errors are logged in full
//! and replaced by a generic message before they reach the client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized | ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict | ErrorCode::InsufficientStock => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(err: &Error) -> Error {
    if err.code() != ErrorCode::InternalError {
        return err.clone();
    }
    error!(message = err.message(), details = ?err.details(), "internal error");
    let redacted = Error::internal(REDACTED_MESSAGE);
    match err.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::json;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    async fn body_of(err: &Error) -> Error {
        let response = ResponseError::error_response(err);
        let bytes = to_bytes(response.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("error json")
    }

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("login"), StatusCode::UNAUTHORIZED)]
    #[case(Error::invalid_credentials("nope"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("mine"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("dup"), StatusCode::CONFLICT)]
    #[case(Error::insufficient_stock("Teclado"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_follows_code(#[case] err: Error, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&err), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_errors_are_redacted_but_keep_trace_id() {
        let err = Error::internal("connection string leaked")
            .with_trace_id(TRACE_ID)
            .with_details(json!({ "secret": "x" }));

        let response = ResponseError::error_response(&err);
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some(TRACE_ID)
        );

        let body = body_of(&err).await;
        assert_eq!(body.message(), REDACTED_MESSAGE);
        assert_eq!(body.trace_id(), Some(TRACE_ID));
        assert!(body.details().is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn stock_errors_name_the_product() {
        let body = body_of(&Error::insufficient_stock("Teclado")).await;
        assert_eq!(body.code(), ErrorCode::InsufficientStock);
        assert_eq!(body.details(), Some(&json!({ "producto": "Teclado" })));
    }
}
