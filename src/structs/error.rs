use actix_web::http::{StatusCode, header};
use actix_web::{Error, HttpResponse, error};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    pub fn new(detail: impl Serialize) -> Self {
        Self {
            detail: serde_json::to_value(detail).unwrap_or(serde_json::Value::Null),
        }
    }
}

/// Build a JSON error response of the form `{"detail": ...}`.
pub fn error_response(status: StatusCode, detail: impl Serialize) -> HttpResponse {
    HttpResponse::build(status).json(ErrorDetail::new(detail))
}

/// Same as [`error_response`] but as an `actix_web::Error`, for `?` and extractor configs.
pub fn json_error<E>(cause: E, status: StatusCode, detail: impl Serialize) -> Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    error::InternalError::from_response(cause, error_response(status, detail)).into()
}

pub fn unauthorized_response(detail: &str) -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
        .json(ErrorDetail::new(detail))
}
