//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: bracket evaluation,
//! per-country net pay rules behind a single dispatcher, employer cost,
//! STI target evaluation and country comparison. Every function reads a
//! [`ConfigStore`](crate::config::ConfigStore) snapshot and returns an
//! immutable result.

mod brackets;
mod comparison;
mod detailed_rule;
mod employer_cost;
mod generic_rule;
mod input;
mod net_pay;
mod payroll_tax_rule;
mod sti;

pub use brackets::{apply_cumulative_brackets, apply_threshold_lookup};
pub use comparison::{annual_projection, compare_countries};
pub use detailed_rule::{MANDATORY_RESERVE_RATE, provisioned_bonus_average};
pub use employer_cost::{compare_employer_costs, compute_employer_cost};
pub use net_pay::{BASE_SALARY_LABEL, NetPayOptions, OTHER_DEDUCTIONS_LABEL, compute_net};
pub use sti::{OPEN_LEVEL, classify, evaluate_sti, get_target_range};
