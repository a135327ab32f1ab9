//! Payroll-tax net-pay rule.
//!
//! Flat withholdings on gross salary: social security up to a monthly share
//! of the annual wage base, uncapped medicare, and an optional state rate.

use rust_decimal::Decimal;

use crate::config::ConfigStore;
use crate::error::EngineResult;
use crate::models::{CalculationResult, LineItem};

use super::input::in_range;
use super::net_pay::{BASE_SALARY_LABEL, NetPayOptions, OTHER_DEDUCTIONS_LABEL};

/// Computes net pay under the payroll-tax rule.
pub(crate) fn calculate_payroll_tax_net(
    store: &ConfigStore,
    gross_salary: Decimal,
    options: &NetPayOptions,
) -> EngineResult<CalculationResult> {
    let config = store.payroll_tax();
    let monthly_wage_base = config.social_security_wage_base / Decimal::from(12);

    let social_security = gross_salary.min(monthly_wage_base) * config.social_security_rate;
    let medicare = gross_salary * config.medicare_rate;

    let mut lines = vec![
        LineItem::earning(BASE_SALARY_LABEL, gross_salary),
        LineItem::deduction(
            format!("Social Security ({}%)", as_percent(config.social_security_rate)),
            social_security,
        ),
        LineItem::deduction(
            format!("Medicare ({}%)", as_percent(config.medicare_rate)),
            medicare,
        ),
    ];

    if options.state_rate > Decimal::ZERO {
        let state_tax = in_range("gross_salary", gross_salary.checked_mul(options.state_rate))?;
        let state_percent = in_range(
            "state_rate",
            options.state_rate.checked_mul(Decimal::ONE_HUNDRED),
        )?;
        lines.push(LineItem::deduction(
            format!("State Tax - {} ({:.2}%)", options.state_name, state_percent),
            state_tax,
        ));
    }
    if options.other_deductions > Decimal::ZERO {
        lines.push(LineItem::deduction(
            OTHER_DEDUCTIONS_LABEL,
            options.other_deductions,
        ));
    }

    CalculationResult::from_lines(lines, Decimal::ZERO)
}

fn as_percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}
