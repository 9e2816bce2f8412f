//! Error to HTTP response mapping.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tally_core::{LedgerError, ValidationError};
use tally_db::StoreError;
use tally_shared::AppError;
use tracing::error;

/// Error returned by handlers, rendered as `{ "error", "message" }` JSON.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 404 with the given message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 400 with the given message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(LedgerError::from(err).into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::MonthKey;

    #[test]
    fn test_month_closed_maps_to_423() {
        let month: MonthKey = "2025-01".parse().unwrap();
        let response = ApiError::from(LedgerError::MonthClosed(month)).into_response();
        assert_eq!(response.status(), StatusCode::LOCKED);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = ApiError::from(ValidationError::InvalidTitle).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_corrupt_record_is_internal() {
        let response =
            ApiError::from(StoreError::CorruptRecord("bad category".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
