//! Application error taxonomy and HTTP mapping.
//!
//! Every registry operation returns [`AppError`]. The variant tells the caller
//! what *kind* of outcome occurred; [`IntoResponse`] turns that kind into a
//! conventional HTTP status with a JSON body:
//!
//! ```json
//! { "error": { "code": "code_conflict", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::is_unique_violation_on_code;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body failed structural validation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Target URL missing or not a valid absolute URL.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// Custom code does not match `^[A-Za-z0-9]{6,8}$`.
    #[error("{message}")]
    InvalidFormat { message: String, details: Value },

    /// Code is already taken.
    #[error("{message}")]
    CodeConflict { message: String, details: Value },

    /// Code generation ran out of attempts.
    #[error("{message}")]
    AllocationExhausted { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Backing store I/O or transaction failure.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidFormat {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::CodeConflict {
            message: message.into(),
            details,
        }
    }
    pub fn allocation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::AllocationExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidFormat { .. } => "invalid_format",
            AppError::CodeConflict { .. } => "code_conflict",
            AppError::AllocationExhausted { .. } => "allocation_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::InvalidUrl { .. }
            | AppError::InvalidFormat { .. } => StatusCode::BAD_REQUEST,
            AppError::CodeConflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AllocationExhausted { .. } | AppError::StoreUnavailable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }


    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::InvalidUrl { message, details }
            | AppError::InvalidFormat { message, details }
            | AppError::CodeConflict { message, details }
            | AppError::AllocationExhausted { message, details }
            | AppError::NotFound { message, details }
            | AppError::StoreUnavailable { message, details } => (message, details),
        };

        ErrorInfo {
            code: self.code(),
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    // Failures are logged where they originate, with their cause.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_code(&e) {
            return AppError::conflict("This short code is already in use", json!({}));
        }

        tracing::error!(error = %e, "Database error");
        AppError::store_unavailable("Database error", json!({}))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}
