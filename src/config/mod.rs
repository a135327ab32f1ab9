//! Configuration loading and management for the payroll engine.
//!
//! This module loads tax tables, employer charges, STI bands and country
//! metadata from a directory into one immutable [`ConfigStore`].
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let store = ConfigLoader::load("./config");
//! println!("Months factor: {}", store.months_factor("Brazil"));
//! ```

mod loader;
mod store;
mod types;

pub use loader::ConfigLoader;
pub use store::{ConfigStore, DEFAULT_MONTHS_FACTOR, TableLoadFailure};
pub use types::{
    BasePolicy, Bracket, ContributionTable, CountryInfo, CountryTables, EmployerCharge, FlatRate,
    NetPayRule, PayrollTaxConfig, SalaryCap, StiConfig, ThresholdTable, Tier, Translations,
};
