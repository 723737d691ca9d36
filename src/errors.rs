//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::sqlx::error::ErrorKind;
use sea_orm::{DbErr, RuntimeErr};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Missing API Key")]
    MissingApiKey,

    #[error("Invalid API Key")]
    InvalidApiKey,

    // Storage outcomes
    #[error("{0} not found")]
    NotFound(String),

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Referenced row does not exist: {0}")]
    ForeignKeyViolation(String),

    #[error("More than one {0} row matched")]
    AmbiguousResult(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(DbErr),

    #[error("Media storage error")]
    Media(#[from] std::io::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    result: bool,
    error_type: String,
    error_message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::MissingApiKey | AppError::InvalidApiKey => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            AppError::ForeignKeyViolation(_) => "FOREIGN_KEY_VIOLATION",
            AppError::AmbiguousResult(_) => "AMBIGUOUS_RESULT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Media(_) => "MEDIA_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::MissingApiKey | AppError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) | AppError::ForeignKeyViolation(_) => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::AmbiguousResult(_)
            | AppError::Database(_)
            | AppError::Media(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::ConstraintViolation(_) => "The request conflicts with existing data".to_string(),
            AppError::ForeignKeyViolation(_) => "A referenced resource does not exist".to_string(),

            AppError::AmbiguousResult(table) => {
                tracing::error!("Ambiguous result on table {}", table);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Media(e) => {
                tracing::error!("Media storage error: {:?}", e);
                "Failed to store media file".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            result: false,
            error_type: self.code().to_string(),
            error_message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Classify driver-level constraint failures; everything else stays a database error.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        let violation = match &err {
            DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
                .as_database_error()
                .map(|db| (db.kind(), db.message().to_string())),
            _ => None,
        };

        match violation {
            Some((
                ErrorKind::UniqueViolation | ErrorKind::CheckViolation | ErrorKind::NotNullViolation,
                message,
            )) => AppError::ConstraintViolation(message),
            Some((ErrorKind::ForeignKeyViolation, message)) => AppError::ForeignKeyViolation(message),
            _ => AppError::Database(err),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, what: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, what: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(what))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    pub fn ambiguous(table: impl Into<String>) -> Self {
        AppError::AmbiguousResult(table.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn storage_errors_map_to_transport_statuses() {
        let cases = [
            (AppError::MissingApiKey, StatusCode::UNAUTHORIZED),
            (AppError::InvalidApiKey, StatusCode::UNAUTHORIZED),
            (AppError::not_found("User"), StatusCode::NOT_FOUND),
            (AppError::ForeignKeyViolation("fk".into()), StatusCode::NOT_FOUND),
            (AppError::ConstraintViolation("uq".into()), StatusCode::CONFLICT),
            (AppError::ambiguous("like"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::validation("bad"), StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn error_body_carries_result_flag_and_type() {
        let body = body_json(AppError::MissingApiKey.into_response()).await;

        assert_eq!(body["result"], false);
        assert_eq!(body["error_type"], "UNAUTHORIZED");
        assert_eq!(body["error_message"], "Missing API Key");
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let body = body_json(AppError::internal("pool exhausted").into_response()).await;

        assert_eq!(body["error_message"], "An internal error occurred");
    }

    #[test]
    fn unrelated_db_errors_are_not_reclassified() {
        let error = AppError::from(DbErr::RecordNotFound("tweet".into()));
        assert!(matches!(error, AppError::Database(_)));
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(AppError::not_found("User").to_string(), "User not found");
        assert!(None::<i32>.ok_or_not_found("Tweet").is_err());
    }
}
