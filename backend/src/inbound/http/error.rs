//! Actix rendering of domain errors.
//!
//! Status codes follow [`ErrorCode`]. Internal failures reach clients as a
//! generic message carrying only the trace id; everything else is sent as-is
//! so form validation details survive the trip.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias shared by the catalog handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_view(err: &Error) -> Cow<'_, Error> {
    if !err.is_internal() {
        return Cow::Borrowed(err);
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    Cow::Owned(match err.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_view(self).as_ref())
    }
}

/// Extractor and payload failures raised by Actix itself. Client errors keep
/// their message; anything else is logged and redacted.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        let status = err.as_response_error().status_code();
        if status.is_client_error() {
            return Error::invalid_request(err.to_string());
        }
        error!(%status, error = %err, "actix failure surfaced to handler");
        Error::internal(REDACTED_MESSAGE)
    }
}
