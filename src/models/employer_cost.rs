//! Employer cost result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employer charge in an [`EmployerCostResult`] breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    /// The charge name as configured.
    pub charge_name: String,
    /// Annual amount of the charge.
    pub amount: Decimal,
    /// The configured rate, in percent.
    pub rate_percent: Decimal,
}

/// The annual cost of an employee to their employer.
///
/// `cost_multiplier` relates the total cost to twelve monthly salaries and
/// is zero when the salary is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCostResult {
    /// Salary with statutory extras, bonus and all charges.
    pub total_annual_cost: Decimal,
    /// Sum of all employer charges.
    pub total_charges: Decimal,
    /// `total_annual_cost / (monthly_salary * 12)`.
    pub cost_multiplier: Decimal,
    /// The remuneration months factor used.
    pub months_factor: Decimal,
    /// Charges in configured order.
    pub breakdown: Vec<ChargeBreakdown>,
}

/// One country's row in a side-by-side employer cost comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCostComparisonRow {
    /// The country compared.
    pub country: String,
    /// Currency symbol for display.
    pub currency_symbol: String,
    /// Flag for display.
    pub flag: String,
    /// The country's full employer cost, breakdown included.
    pub cost: EmployerCostResult,
}
