use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use briefing_core::error::AppError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError {
    error: AppError,
    /// Prefix for the client-facing message, e.g. "Scraping failed".
    context: Option<&'static str>,
}

impl ApiError {
    pub fn with_context(error: AppError, context: &'static str) -> Self {
        Self {
            error,
            context: Some(context),
        }
    }

    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match &self.error {
            AppError::HttpError(_) | AppError::NetworkError(_) => {
                (StatusCode::BAD_GATEWAY, "fetch_failed")
            }
            AppError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            AppError::ConstraintViolation(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "constraint_violation")
            }
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Generic(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            context: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_kind();

        let message = match self.context {
            Some(context) => format!("{context}: {}", self.error),
            None => self.error.to_string(),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}
