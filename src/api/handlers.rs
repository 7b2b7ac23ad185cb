//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::PayrollPeriod;
use crate::service::StatutoryUpdate;

use super::request::{
    BankFileRequest, CalculatePayrollRequest, ProcessPayrollRequest, RecordPaymentRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/payroll/process", post(process_handler))
        .route("/payroll/calculate", post(calculate_handler))
        .route(
            "/payroll/payslip/:employee_id/:period",
            get(payslip_handler),
        )
        .route("/payroll/bank-file", post(bank_file_handler))
        .route("/payroll/history/:employee_id", get(history_handler))
        .route("/payroll/payments", post(payment_handler))
        .route("/payroll/statutory", put(upsert_statutory_handler))
        .route("/payroll/statutory/:employee_id", get(statutory_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    let response = ApiErrorResponse::bad_request(error);
    Err(json_response(response.status, response.error))
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// Handler for POST /payroll/process.
///
/// Runs payroll for all eligible employees matching the optional filters
/// and stores the results. Per-employee failures are listed in the response.
async fn process_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessPayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let outcome = request
        .period()
        .and_then(|period| state.service().process_payroll(&period, &request.filter()));

    match outcome {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                period = %request.payroll_period,
                processed = outcome.summary.total_employees,
                failed = outcome.errors.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payroll run completed"
            );
            json_response(StatusCode::OK, outcome)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll/calculate.
///
/// Calculates one employee's payroll without storing it.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let outcome = request.period().and_then(|period| {
        state
            .service()
            .calculate_payroll(&request.employee_id, &period)
    });

    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                net_salary = %result.summary.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /payroll/payslip/:employee_id/:period.
async fn payslip_handler(
    State(state): State<AppState>,
    Path((employee_id, period)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        period = %period,
        "Payslip requested"
    );

    let outcome = period
        .parse::<PayrollPeriod>()
        .and_then(|period| state.service().payslip(&employee_id, &period));

    match outcome {
        Ok(payslip) => json_response(StatusCode::OK, payslip),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll/bank-file.
async fn bank_file_handler(
    State(state): State<AppState>,
    payload: Result<Json<BankFileRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Bank file requested");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match request
        .period()
        .and_then(|period| state.service().bank_transfer_file(&period))
    {
        Ok(file) => json_response(StatusCode::OK, file),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /payroll/history/:employee_id.
async fn history_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Payroll history requested"
    );

    match state.service().payroll_history(&employee_id) {
        Ok(history) => json_response(StatusCode::OK, history),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll/payments.
///
/// Marks a stored payroll record as paid.
async fn payment_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordPaymentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Recording payment");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let paid_at = request.paid_at.unwrap_or_else(Utc::now);
    match state
        .service()
        .record_payment(request.payroll_id, request.transaction_id, paid_at)
    {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /payroll/statutory.
async fn upsert_statutory_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatutoryUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Updating statutory configuration");

    let update = match parse_body(payload, correlation_id) {
        Ok(update) => update,
        Err(response) => return response,
    };

    match state.service().upsert_statutory(update) {
        Ok(config) => json_response(StatusCode::OK, config),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /payroll/statutory/:employee_id.
async fn statutory_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.service().statutory_config(&employee_id) {
        Ok(config) => json_response(StatusCode::OK, config),
        Err(err) => error_response(correlation_id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::ConfigLoader;
    use crate::models::StatutoryConfig;
    use crate::repository::{InMemoryStore, StatutoryRepository};
    use crate::test_support::sample_employee;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        let store = Arc::new(InMemoryStore::new());
        store.add_employee(sample_employee("001", 66_000));
        store
            .upsert_statutory(StatutoryConfig::with_default_rates("001"))
            .unwrap();
        create_router(AppState::in_memory(store, &ConfigLoader::default()))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_version() {
        let response = create_test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_calculate_returns_200() {
        let response = create_test_router()
            .oneshot(post_json(
                "/payroll/calculate",
                r#"{"employee_id": "001", "payroll_period": "2024-03"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let net: rust_decimal::Decimal = json["summary"]["net_salary"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(net, rust_decimal::Decimal::from(82_760));
        assert_eq!(json["payroll_period"], "2024-03");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = create_test_router()
            .oneshot(post_json("/payroll/calculate", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let response = create_test_router()
            .oneshot(post_json("/payroll/calculate", r#"{"employee_id": "001"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_period_returns_400() {
        let response = create_test_router()
            .oneshot(post_json(
                "/payroll/calculate",
                r#"{"employee_id": "001", "payroll_period": "2024-13"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_employee_returns_404() {
        let response = create_test_router()
            .oneshot(post_json(
                "/payroll/calculate",
                r#"{"employee_id": "ghost", "payroll_period": "2024-03"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_statutory_returns_404() {
        let store = Arc::new(InMemoryStore::new());
        store.add_employee(sample_employee("002", 40_000));
        let router = create_router(AppState::in_memory(store, &ConfigLoader::default()));

        let response = router
            .oneshot(
                Request::get("/payroll/statutory/002")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "STATUTORY_NOT_FOUND");
    }
}
