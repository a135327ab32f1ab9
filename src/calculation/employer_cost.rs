//! Employer cost calculation.
//!
//! Employer charges are percentages of an annual base. The base is either
//! twelve monthly salaries or the salary times the country's remuneration
//! months factor, depending on the country's [`BasePolicy`]. Charges that
//! apply to the bonus may add it to their base, and a charge's annual cap
//! clamps the base before the rate is applied.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{BasePolicy, ConfigStore};
use crate::error::EngineResult;
use crate::models::{ChargeBreakdown, EmployerCostComparisonRow, EmployerCostResult};

use super::input::{ensure_non_negative, in_range};

/// Computes the total annual cost of an employee to the employer.
///
/// `total_annual_cost = monthly_salary * months_factor + annual_bonus + charges`
/// and the cost multiplier is that total over twelve monthly salaries (zero
/// when the salary is zero).
///
/// # Arguments
///
/// * `store` - The configuration snapshot to read charges from
/// * `country` - Country key; unknown countries have no charges and factor 12
/// * `monthly_salary` - Monthly base salary
/// * `annual_bonus` - Annual bonus, always part of the total cost
/// * `include_bonus_in_base` - Whether bonus-eligible charges levy the bonus
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// when the salary or bonus is negative, or when an annual amount overflows.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_employer_cost;
/// use payroll_engine::config::ConfigStore;
/// use rust_decimal::Decimal;
///
/// let store = ConfigStore::default();
/// let result = compute_employer_cost(&store, "Atlantis", Decimal::from(1000), Decimal::ZERO, false).unwrap();
///
/// assert_eq!(result.total_annual_cost, Decimal::from(12000));
/// assert_eq!(result.cost_multiplier, Decimal::ONE);
/// ```
pub fn compute_employer_cost(
    store: &ConfigStore,
    country: &str,
    monthly_salary: Decimal,
    annual_bonus: Decimal,
    include_bonus_in_base: bool,
) -> EngineResult<EmployerCostResult> {
    ensure_non_negative("monthly_salary", monthly_salary)?;
    ensure_non_negative("annual_bonus", annual_bonus)?;

    let months_factor = store.months_factor(country);
    let base_twelve_months =
        in_range("monthly_salary", monthly_salary.checked_mul(Decimal::from(12)))?;
    let base_with_benefits =
        in_range("monthly_salary", monthly_salary.checked_mul(months_factor))?;

    let salary_base = match store.base_policy(country) {
        BasePolicy::TwelveMonths => base_twelve_months,
        BasePolicy::WithBenefits => base_with_benefits,
    };

    let breakdown = store
        .employer_charges(country)
        .iter()
        .map(|charge| {
            let mut base = salary_base;
            if charge.applies_to_bonus && include_bonus_in_base {
                base = in_range("annual_bonus", base.checked_add(annual_bonus))?;
            }
            if let Some(cap) = charge.annual_cap {
                base = base.min(cap);
            }
            let levied = in_range("monthly_salary", base.checked_mul(charge.percent_rate))?;
            Ok(ChargeBreakdown {
                charge_name: charge.name.clone(),
                amount: levied / Decimal::ONE_HUNDRED,
                rate_percent: charge.percent_rate,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total_charges = in_range(
        "total_charges",
        breakdown
            .iter()
            .try_fold(Decimal::ZERO, |sum, c| sum.checked_add(c.amount)),
    )?;
    let total_annual_cost = in_range(
        "total_annual_cost",
        base_with_benefits
            .checked_add(annual_bonus)
            .and_then(|cost| cost.checked_add(total_charges)),
    )?;
    let cost_multiplier = if base_twelve_months.is_zero() {
        Decimal::ZERO
    } else {
        in_range(
            "cost_multiplier",
            total_annual_cost.checked_div(base_twelve_months),
        )?
    };

    debug!(
        country = country,
        charges = breakdown.len(),
        total_charges = %total_charges,
        "Computed employer cost"
    );

    Ok(EmployerCostResult {
        total_annual_cost,
        total_charges,
        cost_multiplier,
        months_factor,
        breakdown,
    })
}

/// Computes employer cost for several countries from one salary and bonus.
///
/// Rows keep the order of `countries`. Amounts are nominal, in each
/// country's own currency.
///
/// # Errors
///
/// Fails on the first country whose cost cannot be computed, for the same
/// reasons as [`compute_employer_cost`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compare_employer_costs;
/// use payroll_engine::config::ConfigStore;
/// use rust_decimal::Decimal;
///
/// let store = ConfigStore::default();
/// let rows = compare_employer_costs(
///     &store,
///     ["Atlantis", "Lemuria"],
///     Decimal::from(1000),
///     Decimal::ZERO,
///     true,
/// )
/// .unwrap();
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].country, "Lemuria");
/// ```
pub fn compare_employer_costs<'a, I>(
    store: &ConfigStore,
    countries: I,
    monthly_salary: Decimal,
    annual_bonus: Decimal,
    include_bonus_in_base: bool,
) -> EngineResult<Vec<EmployerCostComparisonRow>>
where
    I: IntoIterator<Item = &'a str>,
{
    countries
        .into_iter()
        .map(|country| {
            let cost = compute_employer_cost(
                store,
                country,
                monthly_salary,
                annual_bonus,
                include_bonus_in_base,
            )?;
            let profile = store.country_profile(country);
            Ok(EmployerCostComparisonRow {
                country: profile.name,
                currency_symbol: profile.currency_symbol,
                flag: profile.flag,
                cost,
            })
        })
        .collect()
}
