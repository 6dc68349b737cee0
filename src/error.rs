//! Error taxonomy shared by the services and the HTTP layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// An account (or teacher record) already uses this email.
    #[error("{0}")]
    DuplicateIdentity(String),

    /// Admin accounts must be created with an explicit password.
    #[error("Password is required for {0} accounts")]
    MissingCredential(String),

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("Unsupported file format. Please upload .xlsx or .csv file")]
    UnsupportedFormat,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid date format in {column}: {value}")]
    InvalidDate { column: String, value: String },

    #[error("{0}")]
    FieldValidation(String),

    #[error("Failed to deliver notification: {0}")]
    DeliveryError(String),

    #[error("File size exceeds {limit_mb}MB limit")]
    SizeLimitExceeded { limit_mb: usize },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateIdentity(_) => StatusCode::CONFLICT,
            AppError::MissingCredential(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedOperation(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFormat => StatusCode::BAD_REQUEST,
            AppError::MissingColumns(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            AppError::FieldValidation(_) => StatusCode::BAD_REQUEST,
            AppError::DeliveryError(_) => StatusCode::BAD_GATEWAY,
            AppError::SizeLimitExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::DuplicateIdentity(_) => "duplicate_identity",
            AppError::MissingCredential(_) => "missing_credential",
            AppError::UnsupportedOperation(_) => "unsupported_operation",
            AppError::UnsupportedFormat => "unsupported_format",
            AppError::MissingColumns(_) => "missing_columns",
            AppError::InvalidDate { .. } => "invalid_date",
            AppError::FieldValidation(_) => "field_validation",
            AppError::DeliveryError(_) => "delivery_error",
            AppError::SizeLimitExceeded { .. } => "size_limit_exceeded",
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::Database(_) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                "A database error occurred. Please try again later.".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "An internal error occurred. Please try again later.".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(json!({
                "error": self.kind(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Failed to hash password: {err}"))
    }
}
