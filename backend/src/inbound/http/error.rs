//! HTTP rendering of domain errors.
//!
//! Handlers return [`crate::domain::Error`]; this module picks the status,
//! copies the trace id into a header and decides what the client may read.
//! Store faults are logged in full and reach the client only as a generic
//! message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

const INTERNAL_MESSAGE: &str = "Internal server error";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

impl From<ErrorCode> for StatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::InvalidRequest => Self::BAD_REQUEST,
            ErrorCode::Unauthorized => Self::UNAUTHORIZED,
            ErrorCode::NotFound => Self::NOT_FOUND,
            ErrorCode::Conflict => Self::CONFLICT,
            ErrorCode::ServiceUnavailable => Self::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The error as the client sees it. Faults on our side keep their code and
/// trace id but lose message and details.
fn client_view(error: &Error) -> Error {
    let generic = match error.code() {
        ErrorCode::InternalError => Error::internal(INTERNAL_MESSAGE),
        ErrorCode::ServiceUnavailable => Error::service_unavailable(UNAVAILABLE_MESSAGE),
        _ => return error.clone(),
    };
    match error.trace_id() {
        Some(id) => generic.with_trace_id(id.to_owned()),
        None => generic,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code().into()
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => {
                error!(message = %self.message(), trace_id = ?self.trace_id(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(message = %self.message(), trace_id = ?self.trace_id(), "backing store unavailable");
            }
            _ => {}
        }

        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(client_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced in handler");
        Error::internal(INTERNAL_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
