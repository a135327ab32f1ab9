//! Response types for the payroll engine API.
//!
//! This module defines the response envelopes returned by each endpoint,
//! plus the error response structures and error handling for the HTTP API.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{
    BasePolicy, ContributionTable, EmployerCharge, FlatRate, NetPayRule, PayrollTaxConfig,
    SalaryCap, ThresholdTable,
};
use crate::error::EngineError;
use crate::models::{
    AnnualProjection, CalculationResult, CountryComparisonRow, CountryProfile,
    EmployerCostComparisonRow, EmployerCostResult, StiEvaluation, TargetRange,
};

/// Response body for the `/net-pay` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetPayResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The country's presentation metadata.
    pub country: CountryProfile,
    /// The itemised monthly result.
    pub result: CalculationResult,
    /// Total deductions over total earnings.
    pub effective_rate: Decimal,
    /// The salary and bonus projected onto a year.
    pub annual: AnnualProjection,
}

/// Response body for the `/employer-cost` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerCostResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The country's presentation metadata.
    pub country: CountryProfile,
    /// The annual cost and its charge breakdown.
    pub result: EmployerCostResult,
}

/// Response body for the `/sti/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The band lookup and classification.
    pub evaluation: StiEvaluation,
}

/// Response body for the `/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// One row per requested country, in request order.
    pub rows: Vec<CountryComparisonRow>,
}

/// Response body for the `/employer-cost/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerCostComparisonResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// One row per requested country, in request order.
    pub rows: Vec<EmployerCostComparisonRow>,
}

/// Response body for the `/tables/:country` endpoint.
///
/// Only the tables of the country's net-pay rule are present: the
/// contribution and income tax tables for the detailed rule, the payroll
/// tax rates for the payroll-tax rule, the flat rates and salary caps for
/// the generic rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesResponse {
    /// The country's presentation metadata.
    pub country: CountryProfile,
    /// The rule net pay is computed with.
    pub net_pay_rule: NetPayRule,
    /// Which annual base employer charges apply to.
    pub base_policy: BasePolicy,
    /// Employer charges in configured order.
    pub employer_charges: Vec<EmployerCharge>,
    /// Cumulative social contribution brackets and their cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_contribution: Option<ContributionTable>,
    /// Income tax tiers and the per-dependent deduction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_tax: Option<ThresholdTable>,
    /// Social security, medicare and state rates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payroll_tax: Option<PayrollTaxConfig>,
    /// Flat rates in configured order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flat_rates: Vec<FlatRate>,
    /// Monthly salary ceilings for the flat rates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub salary_caps: Vec<SalaryCap>,
}

/// Response body for the `/sti/ranges` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiRangesResponse {
    /// Configured areas, alphabetically.
    pub areas: Vec<StiAreaBands>,
}

/// The target bands of one STI area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiAreaBands {
    /// The job area.
    pub area: String,
    /// Bands in selectable level order.
    pub levels: Vec<StiBand>,
}

/// One level's target band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiBand {
    /// The job level.
    pub level: String,
    /// The `[min, max]` bonus ratio band.
    pub target: TargetRange,
}

/// Response body for the `/countries` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesResponse {
    /// Every configured country, alphabetically.
    pub countries: Vec<CountryProfile>,
    /// Payroll-tax jurisdictions and their rates.
    pub states: BTreeMap<String, Decimal>,
    /// STI areas and their selectable levels.
    pub sti_levels: BTreeMap<String, Vec<String>>,
    /// Languages with translation strings.
    pub languages: Vec<String>,
}

/// Response body for the `/admin/reload` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    /// When the new snapshot was swapped in.
    pub timestamp: DateTime<Utc>,
    /// Number of countries in the new snapshot.
    pub countries: usize,
    /// Tables that fell back to defaults, with the reason.
    pub failed_tables: Vec<TableFailure>,
}

/// A configuration table that fell back to its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFailure {
    /// The document name.
    pub table: String,
    /// Why the document could not be used.
    pub error: String,
}

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

    /// Creates a country not found error response.
    pub fn country_not_found(country: &str) -> Self {
        Self::with_details(
            "COUNTRY_NOT_FOUND",
            format!("Country not found: {}", country),
            format!("No country metadata is configured for '{}'", country),
        )
    }

    /// Creates a language not found error response.
    pub fn language_not_found(language: &str) -> Self {
        Self::with_details(
            "LANGUAGE_NOT_FOUND",
            format!("Language not found: {}", language),
            format!("No translation strings are configured for '{}'", language),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidTable { table, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration table",
                    format!("{}: {}", table, message),
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input '{}': {}", field, message),
                    "The request contains an out-of-range value",
                ),
            },
        }
    }
}
