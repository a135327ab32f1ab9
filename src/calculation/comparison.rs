//! Annual projections and side-by-side country comparison.
//!
//! Amounts are compared nominally, each in its own country's currency.

use rust_decimal::Decimal;

use crate::config::ConfigStore;
use crate::error::EngineResult;
use crate::models::{AnnualProjection, CountryComparisonRow};

use super::input::{ensure_non_negative, in_range};
use super::net_pay::{NetPayOptions, compute_net};

/// Projects a monthly salary and annual bonus onto a year.
///
/// The annual salary is the monthly salary times the country's remuneration
/// months factor.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// when the salary or bonus is negative, or when the annual amounts overflow.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::annual_projection;
/// use payroll_engine::config::ConfigStore;
/// use rust_decimal::Decimal;
///
/// let store = ConfigStore::default();
/// let projection = annual_projection(&store, "Chile", Decimal::from(1000), Decimal::from(500)).unwrap();
///
/// assert_eq!(projection.annual_total, Decimal::from(12500));
/// ```
pub fn annual_projection(
    store: &ConfigStore,
    country: &str,
    monthly_salary: Decimal,
    annual_bonus: Decimal,
) -> EngineResult<AnnualProjection> {
    ensure_non_negative("monthly_salary", monthly_salary)?;
    ensure_non_negative("annual_bonus", annual_bonus)?;

    let months_factor = store.months_factor(country);
    let annual_salary = in_range("monthly_salary", monthly_salary.checked_mul(months_factor))?;
    let annual_total = in_range("annual_bonus", annual_salary.checked_add(annual_bonus))?;
    Ok(AnnualProjection {
        months_factor,
        annual_salary,
        annual_bonus,
        annual_total,
    })
}

/// Compares net pay for the same nominal salary across countries.
///
/// Each country is computed with default options apart from the bonus. The
/// annual net estimate applies the monthly effective rate to the annual
/// gross. Rows keep the order of `countries`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// when the salary or bonus is negative, or when a country's amounts
/// overflow.
pub fn compare_countries<'a, I>(
    store: &ConfigStore,
    countries: I,
    monthly_salary: Decimal,
    annual_bonus: Decimal,
) -> EngineResult<Vec<CountryComparisonRow>>
where
    I: IntoIterator<Item = &'a str>,
{
    ensure_non_negative("monthly_salary", monthly_salary)?;
    ensure_non_negative("annual_bonus", annual_bonus)?;

    let options = NetPayOptions {
        annual_bonus,
        ..NetPayOptions::default()
    };

    countries
        .into_iter()
        .map(|country| {
            let result = compute_net(store, country, monthly_salary, &options)?;
            let profile = store.country_profile(country);
            let annual_gross =
                annual_projection(store, country, monthly_salary, annual_bonus)?.annual_total;
            let effective_rate = result.effective_rate();
            let annual_net_estimate = in_range(
                "annual_net_estimate",
                annual_gross.checked_mul(Decimal::ONE - effective_rate),
            )?;

            Ok(CountryComparisonRow {
                country: profile.name,
                currency_symbol: profile.currency_symbol,
                flag: profile.flag,
                monthly_gross: monthly_salary,
                monthly_net: result.net_salary,
                monthly_deductions: result.total_deductions,
                effective_rate,
                annual_gross,
                annual_net_estimate,
            })
        })
        .collect()
}
