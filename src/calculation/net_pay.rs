//! Net pay dispatch.
//!
//! [`compute_net`] looks up the country's [`NetPayRule`] in the store and
//! runs the matching rule. Every rule produces an itemised
//! [`CalculationResult`] whose first line is the base salary earning.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ConfigStore, NetPayRule};
use crate::error::EngineResult;
use crate::models::CalculationResult;

use super::detailed_rule::calculate_detailed_net;
use super::generic_rule::calculate_generic_net;
use super::input::{ensure_fraction, ensure_non_negative};
use super::payroll_tax_rule::calculate_payroll_tax_net;

/// Label of the base salary earning line.
pub const BASE_SALARY_LABEL: &str = "Base Salary";

/// Label of the caller-supplied deductions line.
pub const OTHER_DEDUCTIONS_LABEL: &str = "Other Deductions";

/// Optional inputs to a net pay calculation.
///
/// Each rule reads only the options it understands: dependents and bonus
/// averages apply to the detailed rule, the state fields to the payroll-tax
/// rule. Other deductions apply everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetPayOptions {
    /// Number of dependents claimed for income tax.
    pub dependents: u32,
    /// Additional monthly deductions, shown as their own line when positive.
    pub other_deductions: Decimal,
    /// Annual bonus, used to provision bonus averages.
    pub annual_bonus: Decimal,
    /// Whether bonus averages are provisioned as a monthly earning.
    pub include_bonus_averages: bool,
    /// Flat state income tax rate, as a fraction.
    pub state_rate: Decimal,
    /// State name shown on the state tax line.
    pub state_name: String,
}

/// Computes monthly net pay for a country.
///
/// # Arguments
///
/// * `store` - The configuration snapshot to read rates from
/// * `country` - Country key; unlisted countries use the generic rule
/// * `gross_salary` - Monthly gross salary
/// * `options` - Rule-specific inputs
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// when the gross salary, other deductions or annual bonus is negative, when
/// the state rate is outside `[0, 1]`, or when a total overflows.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{NetPayOptions, compute_net};
/// use payroll_engine::config::ConfigStore;
/// use rust_decimal::Decimal;
///
/// // No flat rates are configured, so nothing is withheld.
/// let store = ConfigStore::default();
/// let result = compute_net(&store, "Atlantis", Decimal::from(5000), &NetPayOptions::default()).unwrap();
///
/// assert_eq!(result.net_salary, Decimal::from(5000));
/// ```
pub fn compute_net(
    store: &ConfigStore,
    country: &str,
    gross_salary: Decimal,
    options: &NetPayOptions,
) -> EngineResult<CalculationResult> {
    ensure_non_negative("gross_salary", gross_salary)?;
    ensure_non_negative("other_deductions", options.other_deductions)?;
    ensure_non_negative("annual_bonus", options.annual_bonus)?;
    ensure_fraction("state_rate", options.state_rate)?;

    let rule = store.net_pay_rule(country);
    debug!(country = country, rule = ?rule, "Computing net pay");

    match rule {
        NetPayRule::Detailed => calculate_detailed_net(store, gross_salary, options),
        NetPayRule::PayrollTax => calculate_payroll_tax_net(store, gross_salary, options),
        NetPayRule::Generic => calculate_generic_net(store, country, gross_salary, options),
    }
}
