//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    annual_projection, compare_countries, compare_employer_costs, compute_employer_cost,
    compute_net, evaluate_sti,
};
use crate::config::NetPayRule;

use super::request::{
    ComparisonRequest, EmployerCostComparisonRequest, EmployerCostRequest, NetPayRequest,
    StiRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, ComparisonResponse, CountriesResponse,
    EmployerCostComparisonResponse, EmployerCostResponse, NetPayResponse, ReloadResponse,
    StiAreaBands, StiBand, StiRangesResponse, StiResponse, TableFailure, TablesResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/net-pay", post(net_pay_handler))
        .route("/employer-cost", post(employer_cost_handler))
        .route("/employer-cost/compare", post(employer_cost_compare_handler))
        .route("/sti/evaluate", post(sti_handler))
        .route("/sti/ranges", get(sti_ranges_handler))
        .route("/compare", post(compare_handler))
        .route("/countries", get(countries_handler))
        .route("/tables/:country", get(tables_handler))
        .route("/i18n/:lang", get(translations_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(state)
}

/// Handler for POST /net-pay.
async fn net_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<NetPayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing net pay request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let store = state.snapshot();
    let options = request.options(&store);
    let start_time = Instant::now();

    let calculated = compute_net(&store, &request.country, request.gross_salary, &options)
        .and_then(|result| {
            let annual = annual_projection(
                &store,
                &request.country,
                request.gross_salary,
                request.annual_bonus,
            )?;
            Ok((result, annual))
        });

    match calculated {
        Ok((result, annual)) => {
            info!(
                correlation_id = %correlation_id,
                country = %request.country,
                net_salary = %result.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Net pay calculated"
            );
            json_response(NetPayResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                country: store.country_profile(&request.country),
                effective_rate: result.effective_rate(),
                annual,
                result,
            })
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /employer-cost.
async fn employer_cost_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployerCostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employer cost request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let store = state.snapshot();
    match compute_employer_cost(
        &store,
        &request.country,
        request.monthly_salary,
        request.annual_bonus,
        request.include_bonus,
    ) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                country = %request.country,
                total_annual_cost = %result.total_annual_cost,
                "Employer cost calculated"
            );
            json_response(EmployerCostResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                country: store.country_profile(&request.country),
                result,
            })
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /employer-cost/compare.
async fn employer_cost_compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployerCostComparisonRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employer cost comparison request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if request.countries.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error("Select at least one country to compare"),
        );
    }

    let store = state.snapshot();
    match compare_employer_costs(
        &store,
        request.countries.iter().map(String::as_str),
        request.monthly_salary,
        request.annual_bonus,
        request.include_bonus,
    ) {
        Ok(rows) => {
            info!(
                correlation_id = %correlation_id,
                countries = rows.len(),
                "Employer costs compared"
            );
            json_response(EmployerCostComparisonResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                rows,
            })
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /sti/evaluate.
async fn sti_handler(
    State(state): State<AppState>,
    payload: Result<Json<StiRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing STI evaluation request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let store = state.snapshot();
    match evaluate_sti(
        &store,
        &request.country,
        &request.area,
        &request.level,
        request.monthly_salary,
        request.annual_bonus,
    ) {
        Ok(evaluation) => {
            if !evaluation.target_configured {
                warn!(
                    correlation_id = %correlation_id,
                    area = %request.area,
                    level = %request.level,
                    "No STI band configured"
                );
            }
            json_response(StiResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                evaluation,
            })
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /compare.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComparisonRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing comparison request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if request.countries.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error("Select at least one country to compare"),
        );
    }

    let store = state.snapshot();
    match compare_countries(
        &store,
        request.countries.iter().map(String::as_str),
        request.monthly_salary,
        request.annual_bonus,
    ) {
        Ok(rows) => json_response(ComparisonResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            rows,
        }),
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for GET /countries.
async fn countries_handler(State(state): State<AppState>) -> Response {
    let store = state.snapshot();

    json_response(CountriesResponse {
        countries: store
            .country_names()
            .map(|country| store.country_profile(country))
            .collect(),
        states: store.state_rates().clone(),
        sti_levels: store
            .sti_areas()
            .map(|area| (area.to_string(), store.sti_levels(area).to_vec()))
            .collect(),
        languages: store.languages().map(str::to_string).collect(),
    })
}

/// Handler for GET /tables/:country.
async fn tables_handler(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Response {
    let store = state.snapshot();

    if !store.country_names().any(|name| name == country) {
        return error_response(StatusCode::NOT_FOUND, ApiError::country_not_found(&country));
    }

    let rule = store.net_pay_rule(&country);
    let detailed = rule == NetPayRule::Detailed;
    json_response(TablesResponse {
        country: store.country_profile(&country),
        net_pay_rule: rule,
        base_policy: store.base_policy(&country),
        employer_charges: store.employer_charges(&country).to_vec(),
        social_contribution: detailed.then(|| store.social_contribution().clone()),
        income_tax: detailed.then(|| store.income_tax().clone()),
        payroll_tax: (rule == NetPayRule::PayrollTax).then(|| store.payroll_tax().clone()),
        flat_rates: store.flat_rates(&country).to_vec(),
        salary_caps: store.salary_caps(&country).to_vec(),
    })
}

/// Handler for GET /sti/ranges.
async fn sti_ranges_handler(State(state): State<AppState>) -> Response {
    let store = state.snapshot();

    json_response(StiRangesResponse {
        areas: store
            .sti_bands()
            .into_iter()
            .map(|(area, levels)| StiAreaBands {
                area: area.to_string(),
                levels: levels
                    .into_iter()
                    .map(|(level, target)| StiBand {
                        level: level.to_string(),
                        target,
                    })
                    .collect(),
            })
            .collect(),
    })
}

/// Handler for GET /i18n/:lang.
async fn translations_handler(
    State(state): State<AppState>,
    Path(language): Path<String>,
) -> Response {
    let store = state.snapshot();

    match store.translations(&language) {
        Some(strings) => json_response(strings),
        None => error_response(StatusCode::NOT_FOUND, ApiError::language_not_found(&language)),
    }
}

/// Handler for POST /admin/reload.
async fn reload_handler(State(state): State<AppState>) -> Response {
    let store = state.reload();

    json_response(ReloadResponse {
        timestamp: Utc::now(),
        countries: store.country_names().count(),
        failed_tables: store
            .load_failures()
            .iter()
            .map(|failure| TableFailure {
                table: failure.table.clone(),
                error: failure.error.to_string(),
            })
            .collect(),
    })
}

/// Unwraps a JSON body, turning rejections into 400 responses.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
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

    Err(error_response(StatusCode::BAD_REQUEST, error))
}

fn engine_error_response(err: crate::error::EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    error_response(api_error.status, api_error.error)
}

fn error_response(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
