use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input fields.
    Validation(String),
    /// No identity header, or the email resolves to no known role.
    Unauthenticated,
    /// Known identity, wrong role or wrong cohort for this operation.
    Forbidden(String),
    NotFound,
    /// Duplicate submission, duplicate email, delete blocked by references.
    Conflict(String),
    /// External fetch (published spreadsheet CSV) failed.
    Upstream(String),
    Db(sqlx::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation failed: {msg}"),
            AppError::Unauthenticated => write!(f, "Not authenticated"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AppError::Upstream(msg) => write!(f, "Upstream failure: {msg}"),
            AppError::Db(e) => write!(f, "Database error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(ApiErrorBody {
                error: "Validation failed".to_string(),
                details: Some(msg.clone()),
            }),
            AppError::Unauthenticated => HttpResponse::Unauthorized().json(ApiErrorBody {
                error: "Not authenticated".to_string(),
                details: None,
            }),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(ApiErrorBody {
                error: "Forbidden".to_string(),
                details: Some(msg.clone()),
            }),
            AppError::NotFound => HttpResponse::NotFound().json(ApiErrorBody {
                error: "Not found".to_string(),
                details: None,
            }),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(ApiErrorBody {
                error: msg.clone(),
                details: None,
            }),
            AppError::Upstream(msg) => HttpResponse::BadGateway().json(ApiErrorBody {
                error: "Upstream fetch failed".to_string(),
                details: Some(msg.clone()),
            }),
            AppError::Db(e) => {
                log::error!("Database error: {e}");
                HttpResponse::InternalServerError().json(ApiErrorBody {
                    error: "Internal server error".to_string(),
                    details: None,
                })
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound,
            other => AppError::Db(other),
        }
    }
}
