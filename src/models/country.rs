//! Country metadata and comparison models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything a caller needs to present a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryProfile {
    /// The country key used by every calculator.
    pub name: String,
    /// Currency symbol for display.
    pub currency_symbol: String,
    /// Flag for display.
    pub flag: String,
    /// Monthly to annual multiplier (13th salary, vacation bonus).
    pub remuneration_months_factor: Decimal,
}

/// Annualized view of a monthly salary and bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualProjection {
    /// The months factor applied.
    pub months_factor: Decimal,
    /// `monthly_salary * months_factor`.
    pub annual_salary: Decimal,
    /// The annual bonus as given.
    pub annual_bonus: Decimal,
    /// `annual_salary + annual_bonus`.
    pub annual_total: Decimal,
}

/// One country's row in a side-by-side net pay comparison.
///
/// Amounts are nominal, in each country's own currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryComparisonRow {
    /// The country compared.
    pub country: String,
    /// Currency symbol for display.
    pub currency_symbol: String,
    /// Flag for display.
    pub flag: String,
    /// Monthly gross salary.
    pub monthly_gross: Decimal,
    /// Monthly net salary.
    pub monthly_net: Decimal,
    /// Monthly deductions.
    pub monthly_deductions: Decimal,
    /// Deductions divided by earnings for the recurring month.
    pub effective_rate: Decimal,
    /// `monthly_gross * months_factor + annual_bonus`.
    pub annual_gross: Decimal,
    /// `annual_gross * (1 - effective_rate)`.
    pub annual_net_estimate: Decimal,
}
