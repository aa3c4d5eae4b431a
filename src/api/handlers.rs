//! HTTP request handlers for the Salary Engine API.
//!
//! Handlers only parse, delegate to the calculation module and wrap the
//! result; no tax logic lives here.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_bonus_tax, calculate_commission_with, calculate_contractor_income,
    calculate_gross_to_net, calculate_net_to_gross_with, calculate_overtime_pay,
    convert_frequency_for_country, convert_frequency_with,
};
use crate::config::FrequencySettings;
use crate::error::EngineResult;
use crate::models::{Country, FrequencyConversion};

use super::request::{
    BonusRequest, CommissionRequest, ContractorRequest, ConvertFrequencyRequest,
    GrossToNetRequest, NetToGrossRequest, OvertimeRequest,
};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/gross-to-net", post(gross_to_net_handler))
        .route("/net-to-gross", post(net_to_gross_handler))
        .route("/convert-frequency", post(convert_frequency_handler))
        .route("/compensation/overtime", post(overtime_handler))
        .route("/compensation/bonus", post(bonus_handler))
        .route("/compensation/commission", post(commission_handler))
        .route("/compensation/contractor", post(contractor_handler))
        .with_state(state)
}

fn json_response(status: StatusCode, body: impl Serialize) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Unwraps a JSON body or converts the rejection into a 400 response.
fn parse_body<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
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
            Err(error_response(ApiErrorResponse::bad_request(error)))
        }
    }
}

/// Wraps a calculation outcome in the response envelope, logging either way.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    endpoint: &'static str,
    started: Instant,
    outcome: EngineResult<T>,
) -> Response {
    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                endpoint,
                duration_us = started.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(
                StatusCode::OK,
                CalculationResponse::new(correlation_id, result),
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                endpoint,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /gross-to-net.
async fn gross_to_net_handler(
    payload: Result<Json<GrossToNetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gross-to-net request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome = calculate_gross_to_net(&request.country, request.gross_salary, &request.options);
    respond(correlation_id, "gross-to-net", started, outcome)
}

/// Handler for POST /net-to-gross.
///
/// Uses the solver settings from the loaded configuration.
async fn net_to_gross_handler(
    State(state): State<AppState>,
    payload: Result<Json<NetToGrossRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing net-to-gross request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome = calculate_net_to_gross_with(
        &request.country,
        request.net_salary,
        &request.options,
        &state.config().solver(),
    );
    if let Ok(result) = &outcome {
        if !result.convergence.converged {
            warn!(
                correlation_id = %correlation_id,
                residual = %result.convergence.residual,
                "Net-to-gross returned an unconverged estimate"
            );
        }
    }
    respond(correlation_id, "net-to-gross", started, outcome)
}

/// Handler for POST /convert-frequency.
async fn convert_frequency_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConvertFrequencyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing frequency conversion request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome: EngineResult<FrequencyConversion> = match &request.country {
        Some(code) => code
            .parse::<Country>()
            .map(|country| convert_frequency_for_country(request.amount, request.from, country)),
        None => {
            let configured = state.config().frequency();
            let settings = FrequencySettings {
                hours_per_week: request.hours_per_week.unwrap_or(configured.hours_per_week),
                ..configured
            };
            Ok(convert_frequency_with(request.amount, request.from, &settings))
        }
    };
    respond(correlation_id, "convert-frequency", started, outcome)
}

/// Handler for POST /compensation/overtime.
async fn overtime_handler(payload: Result<Json<OvertimeRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overtime request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome = calculate_overtime_pay(&request.country, &request.overtime, &request.options);
    respond(correlation_id, "compensation/overtime", started, outcome)
}

/// Handler for POST /compensation/bonus.
async fn bonus_handler(payload: Result<Json<BonusRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing bonus request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome = calculate_bonus_tax(&request.country, &request.bonus, &request.options);
    respond(correlation_id, "compensation/bonus", started, outcome)
}

/// Handler for POST /compensation/commission.
///
/// Daily and hourly commission is annualised with the configured working time.
async fn commission_handler(
    State(state): State<AppState>,
    payload: Result<Json<CommissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing commission request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome = calculate_commission_with(
        &request.country,
        &request.commission,
        &request.options,
        &state.config().frequency(),
    );
    respond(correlation_id, "compensation/commission", started, outcome)
}

/// Handler for POST /compensation/contractor.
async fn contractor_handler(
    payload: Result<Json<ContractorRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing contractor request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome =
        calculate_contractor_income(&request.country, &request.contractor, &request.options);
    respond(correlation_id, "compensation/contractor", started, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use serde_json::Value;
    use std::str::FromStr;
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        post_json_with(AppState::default(), uri, body).await
    }

    async fn post_json_with(state: AppState, uri: &str, body: &str) -> (StatusCode, Value) {
        let router = create_router(state);
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn decimal(value: &Value) -> Decimal {
        Decimal::from_str(value.as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_gross_to_net_returns_envelope() {
        let (status, body) =
            post_json("/gross-to-net", r#"{ "country": "UK", "gross_salary": 30000 }"#).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["calculation_id"].is_string());
        assert!(body["timestamp"].is_string());
        assert_eq!(body["engine_version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(decimal(&body["result"]["net_salary"]), Decimal::new(251_196, 1));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, body) = post_json("/gross-to-net", "{invalid json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let (status, body) = post_json("/gross-to-net", r#"{ "country": "UK" }"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unsupported_country_returns_400() {
        let (status, body) =
            post_json("/gross-to-net", r#"{ "country": "BR", "gross_salary": 30000 }"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNSUPPORTED_COUNTRY");
    }

    #[tokio::test]
    async fn test_net_to_gross_reports_convergence() {
        let (status, body) =
            post_json("/net-to-gross", r#"{ "country": "DE", "net_salary": 50000 }"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["convergence"]["converged"], true);
        let net = decimal(&body["result"]["salary"]["net_salary"]);
        assert!((net - Decimal::from(50_000)).abs() < Decimal::ONE);
    }

    #[tokio::test]
    async fn test_convert_frequency_with_and_without_country() {
        let (status, body) =
            post_json("/convert-frequency", r#"{ "amount": 25, "from": "hourly" }"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["result"]["annual"]), Decimal::from(52_000));

        let (status, body) = post_json(
            "/convert-frequency",
            r#"{ "amount": 30, "from": "hourly", "country": "FR" }"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["result"]["annual"]), Decimal::from(48_210));
    }

    #[tokio::test]
    async fn test_commission_uses_configured_working_week() {
        use crate::config::{ConfigLoader, EngineConfig};

        let mut config = EngineConfig::default();
        config.frequency.hours_per_week = Decimal::from(35);
        let state = AppState::new(ConfigLoader::from_config(config));

        let (status, body) = post_json_with(
            state,
            "/compensation/commission",
            r#"{ "country": "UK", "commission": { "base_salary": 30000, "commission_amount": 2, "commission_frequency": "hourly" } }"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            decimal(&body["result"]["commission_breakdown"]["annual_commission"]),
            Decimal::from(3_640)
        );
    }
}
