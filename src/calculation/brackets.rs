//! Progressive bracket evaluation.
//!
//! This module provides the two table evaluators the net-pay rules are
//! built on: cumulative brackets (each bracket taxes its own slice of
//! income) and threshold lookup (one tier's rate applies to the whole base).

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::{ContributionTable, ThresholdTable};

/// Applies a cumulative contribution table to an income.
///
/// Brackets are walked in ascending order. Each bracket contributes
/// `(min(income, bound) - previous_bound) * rate`, and the walk stops once
/// the income is covered or the brackets run out, so income above a bounded
/// top bracket is not contributed on. The sum is then clamped to the
/// table's contribution cap, if any.
///
/// Negative income is not validated here; it yields zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::apply_cumulative_brackets;
/// use payroll_engine::config::{Bracket, ContributionTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = ContributionTable {
///     brackets: vec![
///         Bracket { upper_bound: Some(Decimal::from(1000)), rate: Decimal::from_str("0.10").unwrap() },
///         Bracket { upper_bound: None, rate: Decimal::from_str("0.20").unwrap() },
///     ],
///     contribution_cap: None,
/// };
///
/// // 1000 * 10% + 500 * 20%
/// assert_eq!(apply_cumulative_brackets(Decimal::from(1500), &table), Decimal::from(200));
/// ```
pub fn apply_cumulative_brackets(income: Decimal, table: &ContributionTable) -> Decimal {
    let mut contribution = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;

    for bracket in &table.brackets {
        if income <= previous_bound {
            break;
        }
        let slice_top = match bracket.upper_bound {
            Some(bound) => income.min(bound),
            None => income,
        };
        contribution += (slice_top - previous_bound) * bracket.rate;

        match bracket.upper_bound {
            Some(bound) => previous_bound = bound,
            None => break,
        }
    }

    match table.contribution_cap {
        Some(cap) => contribution.min(cap),
        None => contribution,
    }
}

/// Applies a threshold table to a taxable base.
///
/// The per-dependent deduction is subtracted from `net_base` first (floored
/// at zero). The first tier whose upper bound covers the adjusted base
/// supplies the rate and fixed deduction, and the result
/// `adjusted * rate - fixed_deduction` is floored at zero.
///
/// When the adjusted base exceeds every bounded tier the result is zero.
/// Tables should end with an unbounded tier to avoid this; the miss is
/// logged.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::apply_threshold_lookup;
/// use payroll_engine::config::{ThresholdTable, Tier};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = ThresholdTable {
///     tiers: vec![
///         Tier { upper_bound: Some(Decimal::from(2000)), rate: Decimal::ZERO, fixed_deduction: Decimal::ZERO },
///         Tier { upper_bound: None, rate: Decimal::from_str("0.15").unwrap(), fixed_deduction: Decimal::from(300) },
///     ],
///     per_dependent_deduction: Some(Decimal::from(100)),
/// };
///
/// // (3100 - 100) * 15% - 300
/// assert_eq!(apply_threshold_lookup(Decimal::from(3100), 1, &table), Decimal::from(150));
/// ```
pub fn apply_threshold_lookup(net_base: Decimal, dependents: u32, table: &ThresholdTable) -> Decimal {
    let per_dependent = table.per_dependent_deduction.unwrap_or(Decimal::ZERO);
    let dependent_deduction = per_dependent.saturating_mul(Decimal::from(dependents));
    let adjusted_base = net_base.saturating_sub(dependent_deduction).max(Decimal::ZERO);

    let tier = table
        .tiers
        .iter()
        .find(|tier| tier.upper_bound.is_none_or(|bound| adjusted_base <= bound));

    match tier {
        Some(tier) => (adjusted_base * tier.rate - tier.fixed_deduction).max(Decimal::ZERO),
        None => {
            if !table.tiers.is_empty() {
                warn!(
                    base = %adjusted_base,
                    "Base exceeds every threshold tier, resolving to zero tax"
                );
            }
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Bracket, Tier};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(bound: &str, rate: &str) -> Bracket {
        Bracket {
            upper_bound: Some(dec(bound)),
            rate: dec(rate),
        }
    }

    fn tier(bound: Option<&str>, rate: &str, fixed: &str) -> Tier {
        Tier {
            upper_bound: bound.map(dec),
            rate: dec(rate),
            fixed_deduction: dec(fixed),
        }
    }

    fn inss_table() -> ContributionTable {
        ContributionTable {
            brackets: vec![
                bracket("1412.00", "0.075"),
                bracket("2666.68", "0.09"),
                bracket("4000.03", "0.12"),
                bracket("7786.02", "0.14"),
            ],
            contribution_cap: Some(dec("908.85")),
        }
    }

    fn irrf_table() -> ThresholdTable {
        ThresholdTable {
            tiers: vec![
                tier(Some("2259.20"), "0", "0"),
                tier(Some("2826.65"), "0.075", "169.44"),
                tier(Some("3751.05"), "0.15", "381.44"),
                tier(Some("4664.68"), "0.225", "662.77"),
                tier(None, "0.275", "896.00"),
            ],
            per_dependent_deduction: Some(dec("189.59")),
        }
    }

    #[test]
    fn test_income_within_first_bracket() {
        let result = apply_cumulative_brackets(dec("1000"), &inss_table());

        assert_eq!(result, dec("75.000"));
    }

    #[test]
    fn test_income_spanning_two_brackets() {
        // 1412 * 0.075 + (2000 - 1412) * 0.09
        let result = apply_cumulative_brackets(dec("2000"), &inss_table());

        assert_eq!(result, dec("105.90") + dec("52.92"));
    }

    #[test]
    fn test_income_at_bracket_bound_sums_full_slices() {
        let result = apply_cumulative_brackets(dec("2666.68"), &inss_table());

        let expected = dec("1412.00") * dec("0.075") + (dec("2666.68") - dec("1412.00")) * dec("0.09");
        assert_eq!(result, expected);
    }

    #[test]
    fn test_income_above_last_bracket_is_capped() {
        let result = apply_cumulative_brackets(dec("10000"), &inss_table());

        assert_eq!(result, dec("908.85"));
    }

    #[test]
    fn test_bounded_top_bracket_falls_through_without_cap() {
        let mut table = inss_table();
        table.contribution_cap = None;

        let at_top = apply_cumulative_brackets(dec("7786.02"), &table);
        let above_top = apply_cumulative_brackets(dec("50000"), &table);

        assert_eq!(at_top, above_top);
        assert_eq!(at_top, dec("908.8618"));
    }

    #[test]
    fn test_unbounded_top_bracket_keeps_contributing() {
        let table = ContributionTable {
            brackets: vec![
                bracket("1000", "0.10"),
                Bracket {
                    upper_bound: None,
                    rate: dec("0.20"),
                },
            ],
            contribution_cap: None,
        };

        assert_eq!(apply_cumulative_brackets(dec("11000"), &table), dec("2100"));
    }

    #[test]
    fn test_single_bracket_with_cap() {
        let table = ContributionTable {
            brackets: vec![bracket("999999", "0.11")],
            contribution_cap: Some(dec("908.85")),
        };

        assert_eq!(apply_cumulative_brackets(dec("10000"), &table), dec("908.85"));
        assert_eq!(apply_cumulative_brackets(dec("5000"), &table), dec("550"));
    }

    #[test]
    fn test_zero_income_and_empty_table() {
        assert_eq!(apply_cumulative_brackets(Decimal::ZERO, &inss_table()), Decimal::ZERO);
        assert_eq!(
            apply_cumulative_brackets(dec("5000"), &ContributionTable::default()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_threshold_exempt_tier() {
        assert_eq!(apply_threshold_lookup(dec("2000"), 0, &irrf_table()), Decimal::ZERO);
    }

    #[test]
    fn test_threshold_picks_first_covering_tier() {
        // 3000 * 0.15 - 381.44
        let result = apply_threshold_lookup(dec("3000"), 0, &irrf_table());

        assert_eq!(result, dec("68.56"));
    }

    #[test]
    fn test_threshold_unbounded_top_tier() {
        // 9091.15 * 0.275 - 896
        let result = apply_threshold_lookup(dec("9091.15"), 0, &irrf_table());

        assert_eq!(result, dec("1604.06625"));
    }

    #[test]
    fn test_threshold_dependents_reduce_base() {
        // (5000 - 2 * 189.59) * 0.225 - 662.77
        let result = apply_threshold_lookup(dec("5000"), 2, &irrf_table());

        assert_eq!(result, dec("376.9145"));
    }

    #[test]
    fn test_threshold_dependent_deduction_floors_at_zero() {
        let result = apply_threshold_lookup(dec("100"), 50, &irrf_table());

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn test_threshold_fixed_deduction_floors_at_zero() {
        let table = ThresholdTable {
            tiers: vec![tier(None, "0.10", "500")],
            per_dependent_deduction: None,
        };

        assert_eq!(apply_threshold_lookup(dec("1000"), 0, &table), Decimal::ZERO);
    }

    #[test]
    fn test_threshold_base_above_bounded_tiers_is_zero() {
        let table = ThresholdTable {
            tiers: vec![tier(Some("1000"), "0.10", "0")],
            per_dependent_deduction: None,
        };

        assert_eq!(apply_threshold_lookup(dec("1000"), 0, &table), dec("100"));
        assert_eq!(apply_threshold_lookup(dec("1000.01"), 0, &table), Decimal::ZERO);
    }

    #[test]
    fn test_threshold_empty_table() {
        assert_eq!(
            apply_threshold_lookup(dec("5000"), 0, &ThresholdTable::default()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_extreme_inputs_stay_in_range() {
        let flat = ContributionTable {
            brackets: vec![Bracket {
                upper_bound: None,
                rate: Decimal::ONE,
            }],
            contribution_cap: None,
        };
        let generous = ThresholdTable {
            tiers: vec![tier(None, "0.275", "896.00")],
            per_dependent_deduction: Some(Decimal::MAX),
        };

        assert_eq!(apply_cumulative_brackets(Decimal::MAX, &flat), Decimal::MAX);
        assert_eq!(apply_cumulative_brackets(Decimal::MAX, &inss_table()), dec("908.85"));
        assert_eq!(apply_threshold_lookup(Decimal::MAX, u32::MAX, &generous), Decimal::ZERO);
    }
}
