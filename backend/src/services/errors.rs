//! JSON error bodies.
//!
//! Every failing endpoint answers with `{"error": "..."}`. The extractor error
//! handlers below make malformed query strings and JSON bodies follow the same
//! shape instead of actix's plain-text defaults.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use common::responses::ErrorResponse;

pub fn json_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(message))
}

/// Maps a status reported by the artifact repository onto a response status.
pub fn remote_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = json_error(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = json_error(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, response).into()
}
