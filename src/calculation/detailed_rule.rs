//! Detailed net-pay rule.
//!
//! Social contribution from a cumulative bracket table, income tax from a
//! threshold table applied to salary net of that contribution, optional
//! provisioning of bonus averages, and an informational mandatory reserve
//! (FGTS-style deposit).

use rust_decimal::Decimal;

use crate::config::ConfigStore;
use crate::error::EngineResult;
use crate::models::{CalculationResult, LineItem};

use super::brackets::{apply_cumulative_brackets, apply_threshold_lookup};
use super::net_pay::{BASE_SALARY_LABEL, NetPayOptions, OTHER_DEDUCTIONS_LABEL};

/// Share of gross salary deposited by the employer into the mandatory reserve.
pub const MANDATORY_RESERVE_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Provisioned monthly average of an annual bonus.
///
/// Models two extra monthly-equivalent payments (13th salary and vacation
/// pay) plus the statutory one-third bonus on vacation pay:
/// `2 * (bonus / 12) + (bonus / 12) / 3`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::provisioned_bonus_average;
/// use rust_decimal::Decimal;
///
/// // 2 * 1000 + 1000 / 3
/// let average = provisioned_bonus_average(Decimal::from(12000));
/// assert_eq!(average.round_dp(2), Decimal::new(233333, 2));
/// ```
pub fn provisioned_bonus_average(annual_bonus: Decimal) -> Decimal {
    let monthly_bonus = annual_bonus / Decimal::from(12);
    monthly_bonus * Decimal::TWO + monthly_bonus / Decimal::from(3)
}

/// Computes net pay under the detailed rule.
///
/// Lines, in order: base salary, bonus averages (only when
/// `include_bonus_averages` is set and the bonus is positive), social
/// contribution, income tax, other deductions (only when positive).
pub(crate) fn calculate_detailed_net(
    store: &ConfigStore,
    gross_salary: Decimal,
    options: &NetPayOptions,
) -> EngineResult<CalculationResult> {
    let social_contribution = apply_cumulative_brackets(gross_salary, store.social_contribution());
    let income_tax = apply_threshold_lookup(
        gross_salary - social_contribution,
        options.dependents,
        store.income_tax(),
    );

    let mut lines = vec![LineItem::earning(BASE_SALARY_LABEL, gross_salary)];

    if options.include_bonus_averages && options.annual_bonus > Decimal::ZERO {
        lines.push(LineItem::earning(
            "Bonus Averages Provision",
            provisioned_bonus_average(options.annual_bonus),
        ));
    }

    lines.push(LineItem::deduction("Social Contribution", social_contribution));
    lines.push(LineItem::deduction("Income Tax", income_tax));
    if options.other_deductions > Decimal::ZERO {
        lines.push(LineItem::deduction(
            OTHER_DEDUCTIONS_LABEL,
            options.other_deductions,
        ));
    }

    CalculationResult::from_lines(lines, gross_salary * MANDATORY_RESERVE_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Bracket, ContributionTable, ThresholdTable, Tier};
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn store() -> ConfigStore {
        ConfigStore::default()
            .with_social_contribution(ContributionTable {
                brackets: vec![Bracket {
                    upper_bound: Some(dec("999999")),
                    rate: dec("0.11"),
                }],
                contribution_cap: Some(dec("908.85")),
            })
            .with_income_tax(ThresholdTable {
                tiers: vec![
                    Tier {
                        upper_bound: Some(dec("2259.20")),
                        rate: Decimal::ZERO,
                        fixed_deduction: Decimal::ZERO,
                    },
                    Tier {
                        upper_bound: None,
                        rate: dec("0.275"),
                        fixed_deduction: dec("896.00"),
                    },
                ],
                per_dependent_deduction: Some(dec("189.59")),
            })
    }

    #[test]
    fn test_capped_contribution_and_tax_on_net_base() {
        let result =
            calculate_detailed_net(&store(), dec("10000"), &NetPayOptions::default()).unwrap();

        assert_eq!(result.line_items[0].label, BASE_SALARY_LABEL);
        assert_eq!(result.line_items[0].earning, dec("10000"));
        assert_eq!(result.line_items[1].label, "Social Contribution");
        assert_eq!(result.line_items[1].deduction, dec("908.85"));
        // (10000 - 908.85) * 0.275 - 896
        assert_eq!(result.line_items[2].label, "Income Tax");
        assert_eq!(result.line_items[2].deduction, dec("1604.06625"));
        assert_eq!(result.line_items.len(), 3);
        assert_eq!(result.net_salary, dec("10000") - dec("908.85") - dec("1604.06625"));
    }

    #[test]
    fn test_mandatory_reserve_is_informational() {
        let result =
            calculate_detailed_net(&store(), dec("10000"), &NetPayOptions::default()).unwrap();

        assert_eq!(result.mandatory_reserve, dec("800"));
        assert_eq!(
            result.net_salary,
            result.total_earnings - result.total_deductions
        );
    }

    #[test]
    fn test_bonus_averages_line_when_enabled() {
        let options = NetPayOptions {
            annual_bonus: dec("24000"),
            include_bonus_averages: true,
            ..NetPayOptions::default()
        };

        let result = calculate_detailed_net(&store(), dec("10000"), &options).unwrap();

        // monthly 2000: 2 * 2000 + 2000 / 3
        let expected = dec("4000") + dec("2000") / dec("3");
        assert_eq!(result.line_items[1].label, "Bonus Averages Provision");
        assert_eq!(result.line_items[1].earning, expected);
        assert_eq!(result.total_earnings, dec("10000") + expected);
    }

    #[test]
    fn test_bonus_averages_skipped_when_disabled_or_zero() {
        let disabled = NetPayOptions {
            annual_bonus: dec("24000"),
            include_bonus_averages: false,
            ..NetPayOptions::default()
        };
        let zero_bonus = NetPayOptions {
            include_bonus_averages: true,
            ..NetPayOptions::default()
        };

        for options in [disabled, zero_bonus] {
            let result = calculate_detailed_net(&store(), dec("10000"), &options).unwrap();
            assert_eq!(result.total_earnings, dec("10000"));
            assert!(
                result
                    .line_items
                    .iter()
                    .all(|l| l.label != "Bonus Averages Provision")
            );
        }
    }

    #[test]
    fn test_other_deductions_line_last() {
        let options = NetPayOptions {
            other_deductions: dec("150"),
            ..NetPayOptions::default()
        };

        let result = calculate_detailed_net(&store(), dec("2000"), &options).unwrap();

        let last = result.line_items.last().unwrap();
        assert_eq!(last.label, OTHER_DEDUCTIONS_LABEL);
        assert_eq!(last.deduction, dec("150"));
        // 2000 * 0.11 = 220, tax base 1780 is exempt
        assert_eq!(result.total_deductions, dec("370"));
    }

    #[test]
    fn test_dependents_lower_income_tax() {
        let none =
            calculate_detailed_net(&store(), dec("10000"), &NetPayOptions::default()).unwrap();
        let two = calculate_detailed_net(
            &store(),
            dec("10000"),
            &NetPayOptions {
                dependents: 2,
                ..NetPayOptions::default()
            },
        )
        .unwrap();

        // 2 * 189.59 * 0.275
        assert_eq!(
            none.line_items[2].deduction - two.line_items[2].deduction,
            dec("104.2745")
        );
    }

    #[test]
    fn test_provisioned_bonus_average_keeps_one_third_factor() {
        let average = provisioned_bonus_average(dec("1200"));

        assert_eq!(average, dec("200") + dec("100") / dec("3"));
    }

    #[test]
    fn test_extreme_gross_stays_in_range() {
        let result =
            calculate_detailed_net(&store(), Decimal::MAX, &NetPayOptions::default()).unwrap();

        assert_eq!(result.line_items[1].deduction, dec("908.85"));
        assert_eq!(result.total_earnings - result.total_deductions, result.net_salary);
    }

    #[test]
    fn test_overflowing_deductions_are_rejected() {
        let options = NetPayOptions {
            other_deductions: Decimal::MAX,
            ..NetPayOptions::default()
        };

        let result = calculate_detailed_net(&store(), Decimal::MAX, &options);

        assert_eq!(result, Err(EngineError::out_of_range("total_deductions")));
    }
}
