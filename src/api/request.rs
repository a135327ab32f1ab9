//! Request types for the payroll engine API.
//!
//! Monetary fields accept either JSON numbers or decimal strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::NetPayOptions;
use crate::config::ConfigStore;

/// Request body for the `/net-pay` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetPayRequest {
    /// Country key, e.g. "Brazil".
    pub country: String,
    /// Monthly gross salary.
    pub gross_salary: Decimal,
    /// Number of dependents claimed for income tax.
    #[serde(default)]
    pub dependents: u32,
    /// Additional monthly deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Annual bonus.
    #[serde(default)]
    pub annual_bonus: Decimal,
    /// Whether bonus averages are provisioned as a monthly earning.
    #[serde(default)]
    pub include_bonus_averages: bool,
    /// State whose configured rate applies under the payroll-tax rule.
    #[serde(default)]
    pub state: Option<String>,
}

impl NetPayRequest {
    /// Builds calculation options, resolving the state rate from the store.
    ///
    /// Unknown states resolve to a zero rate.
    pub fn options(&self, store: &ConfigStore) -> NetPayOptions {
        let (state_rate, state_name) = match &self.state {
            Some(state) => (store.state_rate(state), state.clone()),
            None => (Decimal::ZERO, String::new()),
        };
        NetPayOptions {
            dependents: self.dependents,
            other_deductions: self.other_deductions,
            annual_bonus: self.annual_bonus,
            include_bonus_averages: self.include_bonus_averages,
            state_rate,
            state_name,
        }
    }
}

/// Request body for the `/employer-cost` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerCostRequest {
    /// Country key.
    pub country: String,
    /// Monthly base salary.
    pub monthly_salary: Decimal,
    /// Annual bonus.
    #[serde(default)]
    pub annual_bonus: Decimal,
    /// Whether bonus-eligible charges levy the bonus.
    #[serde(default = "default_include_bonus")]
    pub include_bonus: bool,
}

fn default_include_bonus() -> bool {
    true
}

/// Request body for the `/sti/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiRequest {
    /// Country key, used for the months factor.
    pub country: String,
    /// STI area, e.g. "Sales".
    pub area: String,
    /// STI level, e.g. "Manager".
    pub level: String,
    /// Monthly base salary.
    pub monthly_salary: Decimal,
    /// Annual bonus.
    pub annual_bonus: Decimal,
}

/// Request body for the `/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// Countries to compare, in display order.
    pub countries: Vec<String>,
    /// Nominal monthly salary.
    pub monthly_salary: Decimal,
    /// Nominal annual bonus.
    #[serde(default)]
    pub annual_bonus: Decimal,
}

/// Request body for the `/employer-cost/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerCostComparisonRequest {
    /// Countries to compare, in display order.
    pub countries: Vec<String>,
    /// Nominal monthly salary.
    pub monthly_salary: Decimal,
    /// Nominal annual bonus.
    #[serde(default)]
    pub annual_bonus: Decimal,
    /// Whether bonus-eligible charges levy the bonus.
    #[serde(default = "default_include_bonus")]
    pub include_bonus: bool,
}
