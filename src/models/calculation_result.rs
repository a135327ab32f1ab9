//! Net pay calculation result models.
//!
//! This module contains the [`CalculationResult`] type returned by every
//! net-pay rule, and the [`LineItem`]s it is built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single earning or deduction line of a payslip.
///
/// Exactly one of `earning` and `deduction` is normally non-zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::LineItem;
/// use rust_decimal::Decimal;
///
/// let line = LineItem::deduction("Medicare", Decimal::new(145, 0));
/// assert_eq!(line.earning, Decimal::ZERO);
/// assert_eq!(line.deduction, Decimal::new(145, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The label shown on the payslip.
    pub label: String,
    /// Amount added to pay.
    pub earning: Decimal,
    /// Amount withheld from pay.
    pub deduction: Decimal,
}

impl LineItem {
    /// Creates an earning line.
    pub fn earning(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            earning: amount,
            deduction: Decimal::ZERO,
        }
    }

    /// Creates a deduction line.
    pub fn deduction(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            earning: Decimal::ZERO,
            deduction: amount,
        }
    }
}

/// The complete result of a monthly net pay calculation.
///
/// Totals are always the exact sums of the line items, and
/// `net_salary == total_earnings - total_deductions`. The totals row a
/// payslip shows is not part of `line_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Lines in computation order, starting with the base salary.
    pub line_items: Vec<LineItem>,
    /// Sum of all earnings.
    pub total_earnings: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Take-home pay.
    pub net_salary: Decimal,
    /// Informational employer deposit (FGTS-style), not deducted from net.
    pub mandatory_reserve: Decimal,
}

impl CalculationResult {
    /// Builds a result by summing the given lines.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when a total overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{CalculationResult, LineItem};
    /// use rust_decimal::Decimal;
    ///
    /// let result = CalculationResult::from_lines(
    ///     vec![
    ///         LineItem::earning("Base Salary", Decimal::new(5000, 0)),
    ///         LineItem::deduction("Income Tax", Decimal::new(750, 0)),
    ///     ],
    ///     Decimal::ZERO,
    /// )
    /// .unwrap();
    /// assert_eq!(result.net_salary, Decimal::new(4250, 0));
    /// ```
    pub fn from_lines(line_items: Vec<LineItem>, mandatory_reserve: Decimal) -> EngineResult<Self> {
        let total_earnings = checked_total(line_items.iter().map(|l| l.earning))
            .ok_or_else(|| EngineError::out_of_range("total_earnings"))?;
        let total_deductions = checked_total(line_items.iter().map(|l| l.deduction))
            .ok_or_else(|| EngineError::out_of_range("total_deductions"))?;
        let net_salary = total_earnings
            .checked_sub(total_deductions)
            .ok_or_else(|| EngineError::out_of_range("net_salary"))?;

        Ok(Self {
            line_items,
            total_earnings,
            total_deductions,
            net_salary,
            mandatory_reserve,
        })
    }

    /// Share of earnings withheld, or zero when there are no earnings.
    ///
    /// Saturates at `Decimal::MAX` when deductions dwarf earnings.
    pub fn effective_rate(&self) -> Decimal {
        if self.total_earnings > Decimal::ZERO {
            self.total_deductions
                .checked_div(self.total_earnings)
                .unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        }
    }
}

fn checked_total(mut amounts: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    amounts.try_fold(Decimal::ZERO, Decimal::checked_add)
}
