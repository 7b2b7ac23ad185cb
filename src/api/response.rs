//! Response types for the payroll API.
//!
//! This module defines the error response structure and the mapping from
//! engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response with a validation error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::PayrollNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("PAYROLL_NOT_FOUND", message),
            ),
            EngineError::StatutoryNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("STATUTORY_NOT_FOUND", message),
            ),
            EngineError::InvalidPeriod { .. }
            | EngineError::InvalidEmployee { .. }
            | EngineError::InvalidRequest { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            EngineError::DuplicatePayroll { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DUPLICATE_PAYROLL",
                    message,
                    "A payroll record already exists for this employee and period",
                ),
            ),
            EngineError::CalculationError { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::Storage { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            ),
            EngineError::Export { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            ),
        };

        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::EmployeeNotFound {
            employee_id: "emp_404".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "EMPLOYEE_NOT_FOUND");
        assert!(api_error.error.message.contains("emp_404"));
    }

    #[test]
    fn test_invalid_period_maps_to_validation_error() {
        let api_error: ApiErrorResponse = EngineError::InvalidPeriod {
            value: "2024-13".to_string(),
            message: "month must be between 1 and 12".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let api_error: ApiErrorResponse = EngineError::DuplicatePayroll {
            employee_id: "emp_001".to_string(),
            period: "2024-03".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "DUPLICATE_PAYROLL");
    }

    #[test]
    fn test_calculation_error_maps_to_422() {
        let api_error: ApiErrorResponse = EngineError::CalculationError {
            message: "net salary is negative".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            api_error.error.details.as_deref(),
            Some("Calculation error: net salary is negative")
        );
    }

    #[test]
    fn test_storage_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::Storage {
            message: "lock poisoned".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "STORAGE_ERROR");
    }
}
