use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::trend::TrendError;
use std::fmt;

/// Errors surfaced by the HTTP services.
#[derive(Debug)]
pub enum ServiceError {
    NotFound(String),
    Invalid(String),
    Db(String),
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(what) => write!(f, "Not found: {what}"),
            ServiceError::Invalid(msg) => write!(f, "Invalid request: {msg}"),
            ServiceError::Db(msg) => write!(f, "Database error: {msg}"),
            ServiceError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
            ServiceError::Db(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        ServiceError::Db(err.to_string())
    }
}

impl From<TrendError> for ServiceError {
    fn from(err: TrendError) -> Self {
        ServiceError::Invalid(err.to_string())
    }
}

impl From<csv::Error> for ServiceError {
    fn from(err: csv::Error) -> Self {
        ServiceError::Invalid(err.to_string())
    }
}
