use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// Application error type shared by the data-access core and the handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Commit-time integrity errors
    #[error("Constraint violation on {constraint}: {detail}")]
    ConstraintViolation { constraint: String, detail: String },

    // Storage errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Query cancelled")]
    Cancelled,

    // Internal errors
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: impl std::fmt::Display) -> Self {
        AppError::NotFound(resource.to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            // 401 Unauthorized
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token", None),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired", None),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),

            // 403 Forbidden
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", None),

            // 404 Not Found
            AppError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, "Not found", Some(resource.clone()))
            }

            // 400 Bad Request
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),

            // 409 Conflict
            AppError::ConstraintViolation { constraint, detail } => (
                StatusCode::CONFLICT,
                "Constraint violation",
                Some(format!("{}: {}", constraint, detail)),
            ),

            // 503 Service Unavailable
            AppError::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "Query cancelled", None),

            // 500 Internal Server Error
            AppError::Persistence(msg) => {
                tracing::error!("Persistence error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

// Convenient conversions from common error types

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                return AppError::ConstraintViolation {
                    constraint: "unique".to_string(),
                    detail,
                }
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                return AppError::ConstraintViolation {
                    constraint: "foreign_key".to_string(),
                    detail,
                }
            }
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(what) => AppError::NotFound(what),
            DbErr::RecordNotUpdated => AppError::NotFound("Record".to_string()),
            _ => classify_driver_message(err.to_string()),
        }
    }
}

// Drivers do not always surface a structured code, fall back to the message.
fn classify_driver_message(message: String) -> AppError {
    let lowered = message.to_lowercase();
    if lowered.contains("foreign key") {
        AppError::ConstraintViolation {
            constraint: "foreign_key".to_string(),
            detail: message,
        }
    } else if lowered.contains("duplicate key") || lowered.contains("unique") {
        AppError::ConstraintViolation {
            constraint: "unique".to_string(),
            detail: message,
        }
    } else {
        AppError::Persistence(message)
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(_: argon2::password_hash::Error) -> Self {
        AppError::InvalidCredentials
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

/// Result type alias for the core and the handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let err: AppError = DbErr::RecordNotFound("Country".to_string()).into();
        assert!(matches!(err, AppError::NotFound(ref what) if what == "Country"));
    }

    #[test]
    fn test_foreign_key_message_maps_to_constraint_violation() {
        let err = classify_driver_message("FOREIGN KEY constraint failed".to_string());
        assert!(matches!(
            err,
            AppError::ConstraintViolation { ref constraint, .. } if constraint == "foreign_key"
        ));
    }

    #[test]
    fn test_unique_message_maps_to_constraint_violation() {
        let err = classify_driver_message("UNIQUE constraint failed: users.email".to_string());
        assert!(matches!(
            err,
            AppError::ConstraintViolation { ref constraint, .. } if constraint == "unique"
        ));
    }

    #[test]
    fn test_other_messages_are_persistence_errors() {
        let err = classify_driver_message("connection reset by peer".to_string());
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::not_found("Hotel 7").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::validation("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ConstraintViolation {
                constraint: "Country.Hotels".to_string(),
                detail: "2 hotels".to_string(),
            }
            .into_response()
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
