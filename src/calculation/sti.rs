//! STI (short-term incentive) target evaluation.
//!
//! An STI band is a `[min, max]` ratio of annual bonus to annual salary for
//! an area and level. The `"Others"` level only enforces its upper bound.

use rust_decimal::Decimal;

use crate::config::ConfigStore;
use crate::error::EngineResult;
use crate::models::{StiEvaluation, TargetRange};

use super::input::{ensure_non_negative, in_range};

/// Level whose band only enforces an upper bound.
pub const OPEN_LEVEL: &str = "Others";

/// Looks up the target band for an area and level.
///
/// Returns `(0, 0)` when the area or level is not configured.
pub fn get_target_range(store: &ConfigStore, area: &str, level: &str) -> TargetRange {
    store.sti_range(area, level).unwrap_or_default()
}

/// Checks whether an actual bonus ratio falls inside a band.
///
/// Bounds are inclusive. For the [`OPEN_LEVEL`] only `actual <= max` is
/// checked.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::classify;
/// use payroll_engine::models::TargetRange;
/// use rust_decimal::Decimal;
///
/// let band = TargetRange { min: Decimal::new(10, 2), max: Decimal::new(20, 2) };
///
/// assert!(!classify(Decimal::ZERO, band, "Manager"));
/// assert!(classify(Decimal::ZERO, band, "Others"));
/// ```
pub fn classify(actual: Decimal, range: TargetRange, level: &str) -> bool {
    if level == OPEN_LEVEL {
        actual <= range.max
    } else {
        range.min <= actual && actual <= range.max
    }
}

/// Evaluates an annual bonus against the band of an area and level.
///
/// The actual ratio is `annual_bonus / (monthly_salary * months_factor)`,
/// zero when the annual salary is zero.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// when the salary or bonus is negative, or when the ratio overflows.
pub fn evaluate_sti(
    store: &ConfigStore,
    country: &str,
    area: &str,
    level: &str,
    monthly_salary: Decimal,
    annual_bonus: Decimal,
) -> EngineResult<StiEvaluation> {
    ensure_non_negative("monthly_salary", monthly_salary)?;
    ensure_non_negative("annual_bonus", annual_bonus)?;

    let annual_salary =
        in_range("monthly_salary", monthly_salary.checked_mul(store.months_factor(country)))?;
    let actual_ratio = if annual_salary.is_zero() {
        Decimal::ZERO
    } else {
        in_range("annual_bonus", annual_bonus.checked_div(annual_salary))?
    };

    let target = get_target_range(store, area, level);

    Ok(StiEvaluation {
        area: area.to_string(),
        level: level.to_string(),
        target,
        target_configured: target.is_configured(),
        actual_ratio,
        in_band: classify(actual_ratio, target, level),
    })
}
