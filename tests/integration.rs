//! End-to-end tests for the Salary Engine HTTP API.
//!
//! This suite drives the router the way a client would:
//! - household and regional options changing the outcome
//! - net-to-gross convergence
//! - frequency conversion
//! - compensation event endpoints
//! - error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use salary_engine::api::{AppState, create_router};
use salary_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/engine.yaml").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn amount(value: &Value) -> Decimal {
    decimal(value.as_str().unwrap_or_else(|| panic!("expected a decimal string, got {}", value)))
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let response = create_router_for_test()
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
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Posts a gross-to-net request and returns the unwrapped result.
async fn gross_to_net(country: &str, gross: u32, options: Value) -> Value {
    let (status, body) = post_json(
        "/gross-to-net",
        json!({ "country": country, "gross_salary": gross, "options": options }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {}", body);
    body["result"].clone()
}

fn assert_conserves_gross(result: &Value) {
    let gross = amount(&result["gross_salary"]);
    let deductions = amount(&result["total_tax"])
        + amount(&result["social_security"])
        + amount(&result["other_deductions"]);
    let drift = (amount(&result["net_salary"]) - (gross - deductions)).abs();
    assert!(drift < decimal("0.000001"), "net does not balance: {}", result);
}

// =============================================================================
// SECTION 1: Household and Regional Options
// =============================================================================

#[tokio::test]
async fn test_ireland_married_one_earner_takes_home_more() {
    let single = gross_to_net("IE", 75_000, json!({})).await;
    let married = gross_to_net("IE", 75_000, json!({ "ie_marital_status": "married_one_earner" })).await;

    assert_eq!(amount(&single["total_tax"]), decimal("19243.8"));
    assert_eq!(amount(&married["net_salary"]), decimal("56481.2"));
    assert!(amount(&married["net_salary"]) > amount(&single["net_salary"]));
}

#[tokio::test]
async fn test_uk_scotland_taxes_differently_from_england() {
    let england = gross_to_net("UK", 60_000, json!({})).await;
    let scotland = gross_to_net("UK", 60_000, json!({ "uk_region": "scotland" })).await;

    assert_ne!(amount(&scotland["total_tax"]), amount(&england["total_tax"]));
    assert!(amount(&scotland["total_tax"]) > amount(&england["total_tax"]));
    // National Insurance is UK-wide
    assert_eq!(
        amount(&scotland["social_security"]),
        amount(&england["social_security"])
    );
}

#[tokio::test]
async fn test_us_california_taxes_more_than_texas() {
    let california = gross_to_net("US", 75_000, json!({ "us_state": "CA" })).await;
    let texas = gross_to_net("US", 75_000, json!({ "us_state": "TX" })).await;

    assert!(amount(&california["total_tax"]) > amount(&texas["total_tax"]));
    assert_conserves_gross(&california);
    assert_conserves_gross(&texas);
}

#[tokio::test]
async fn test_switzerland_zug_beats_basel() {
    let zug = gross_to_net("CH", 80_000, json!({ "ch_canton": "zug" })).await;
    let basel = gross_to_net("CH", 80_000, json!({ "ch_canton": "basel" })).await;

    assert!(amount(&zug["net_salary"]) > amount(&basel["net_salary"]));
}

#[tokio::test]
async fn test_france_family_quotient_favours_married_parents() {
    let single = gross_to_net("FR", 60_000, json!({})).await;
    let family = gross_to_net("FR", 60_000, json!({ "fr_married": true, "fr_children": 2 })).await;

    assert!(amount(&family["net_salary"]) > amount(&single["net_salary"]));
    // Social contributions do not depend on the household
    assert_eq!(
        amount(&family["social_security"]),
        amount(&single["social_security"])
    );
}

#[tokio::test]
async fn test_every_country_answers_with_a_balanced_breakdown() {
    for country in ["US", "UK", "IE", "CA", "AU", "DE", "FR", "NL", "ES", "IT", "PT", "CH", "JP"] {
        let result = gross_to_net(country, 65_000, json!({})).await;
        assert_conserves_gross(&result);

        let lines: Decimal = result["breakdown"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| amount(&item["amount"]))
            .sum();
        let drift = (lines - amount(&result["gross_salary"])).abs();
        assert!(drift < decimal("0.000001"), "{}", country);

        let net_line = result["breakdown"]
            .as_array()
            .unwrap()
            .last()
            .unwrap();
        assert_eq!(net_line["category"], "net", "{}", country);
    }
}

// =============================================================================
// SECTION 2: Net-to-Gross
// =============================================================================

#[tokio::test]
async fn test_germany_net_to_gross_converges() {
    let (status, body) = post_json(
        "/net-to-gross",
        json!({ "country": "DE", "net_salary": 50000 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_eq!(result["convergence"]["converged"], true);
    assert!(result["convergence"]["iterations"].as_u64().unwrap() <= 20);

    let net = amount(&result["salary"]["net_salary"]);
    assert!((net - decimal("50000")).abs() < Decimal::ONE);
    assert!(amount(&result["salary"]["gross_salary"]) > decimal("50000"));
}

#[tokio::test]
async fn test_net_to_gross_agrees_with_gross_to_net() {
    let (status, body) = post_json(
        "/net-to-gross",
        json!({ "country": "AU", "net_salary": 63612 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let gross = amount(&body["result"]["salary"]["gross_salary"]);
    assert!((gross - decimal("80000")).abs() < decimal("5"));
}

// =============================================================================
// SECTION 3: Frequency Conversion
// =============================================================================

#[tokio::test]
async fn test_hourly_rate_converts_with_configured_week() {
    let (status, body) = post_json(
        "/convert-frequency",
        json!({ "amount": 25, "from": "hourly" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&body["result"]["annual"]), decimal("52000"));
}

#[tokio::test]
async fn test_hourly_rate_converts_with_custom_week() {
    let (status, body) = post_json(
        "/convert-frequency",
        json!({ "amount": 25, "from": "hourly", "hours_per_week": 35 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&body["result"]["annual"]), decimal("45500"));
}

#[tokio::test]
async fn test_country_working_time_overrides_hours() {
    let (status, body) = post_json(
        "/convert-frequency",
        json!({ "amount": 40, "from": "hourly", "country": "CH", "hours_per_week": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&body["result"]["annual"]), decimal("87360"));
}

// =============================================================================
// SECTION 4: Compensation Events
// =============================================================================

#[tokio::test]
async fn test_overtime_annualises_regular_and_overtime_pay() {
    let (status, body) = post_json(
        "/compensation/overtime",
        json!({
            "country": "UK",
            "overtime": {
                "hourly_rate": 20,
                "regular_hours_per_week": 40,
                "overtime_hours_per_week": 5
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_eq!(amount(&result["gross_salary"]), decimal("49400"));
    assert_conserves_gross(result);
}

#[tokio::test]
async fn test_bonus_is_taxed_at_the_marginal_rate() {
    let (status, body) = post_json(
        "/compensation/bonus",
        json!({
            "country": "UK",
            "bonus": { "base_salary": 30000, "bonus_amount": 5000 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let bonus = &body["result"]["bonus_breakdown"];
    assert_eq!(amount(&bonus["bonus_tax"]), decimal("1400"));
    assert_eq!(amount(&bonus["net_bonus"]), decimal("3600"));
    assert_eq!(amount(&bonus["bonus_tax_rate"]), decimal("28"));
}

#[tokio::test]
async fn test_monthly_commission_is_annualised() {
    let (status, body) = post_json(
        "/compensation/commission",
        json!({
            "country": "UK",
            "commission": {
                "base_salary": 30000,
                "commission_amount": 500,
                "commission_frequency": "monthly"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let commission = &body["result"]["commission_breakdown"];
    assert_eq!(amount(&commission["annual_commission"]), decimal("6000"));
    assert_eq!(amount(&commission["commission_tax"]), decimal("1680"));
}

#[tokio::test]
async fn test_contractor_pays_self_employment_tax_on_profit() {
    let (status, body) = post_json(
        "/compensation/contractor",
        json!({
            "country": "UK",
            "contractor": { "gross_income": 60000, "business_expenses": 10000 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    let contractor = &result["contractor_breakdown"];
    assert_eq!(amount(&contractor["net_business_income"]), decimal("50000"));
    assert_eq!(amount(&contractor["self_employment_tax"]), decimal("3000"));
    assert_eq!(amount(&contractor["income_tax"]), decimal("7486"));
    assert_eq!(amount(&result["net_salary"]), decimal("39514"));
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_unsupported_country_is_rejected() {
    let (status, body) = post_json(
        "/gross-to-net",
        json!({ "country": "BR", "gross_salary": 50000 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNSUPPORTED_COUNTRY");
}

#[tokio::test]
async fn test_unknown_state_code_is_rejected() {
    let (status, body) = post_json(
        "/gross-to-net",
        json!({ "country": "US", "gross_salary": 50000, "options": { "us_state": "ZZ" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_STATE_CODE");
}

#[tokio::test]
async fn test_unknown_canton_names_the_field() {
    let (status, body) = post_json(
        "/gross-to-net",
        json!({ "country": "CH", "gross_salary": 50000, "options": { "ch_canton": "atlantis" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_OPTION");
    assert_eq!(body["details"], "ch_canton");
}

#[tokio::test]
async fn test_missing_salary_is_a_validation_error() {
    let (status, body) = post_json("/gross-to-net", json!({ "country": "DE" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_frequency_is_rejected() {
    let (status, body) = post_json(
        "/convert-frequency",
        json!({ "amount": 25, "from": "fortnightly-ish" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}
