//! Core data models for the payroll engine.
//!
//! This module contains the result records the calculators return.

mod calculation_result;
mod country;
mod employer_cost;
mod sti;

pub use calculation_result::{CalculationResult, LineItem};
pub use country::{AnnualProjection, CountryComparisonRow, CountryProfile};
pub use employer_cost::{ChargeBreakdown, EmployerCostComparisonRow, EmployerCostResult};
pub use sti::{StiEvaluation, TargetRange};
