//! Multi-country payroll engine.
//!
//! This crate computes monthly net take-home pay under per-country rules,
//! the total annual cost of an employee to the employer, and STI target
//! band evaluation, all from tables loaded once into an immutable
//! [`config::ConfigStore`].
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::calculation::{NetPayOptions, compute_net};
//! use payroll_engine::config::ConfigLoader;
//! use rust_decimal::Decimal;
//!
//! let store = ConfigLoader::load("./config");
//! let result = compute_net(&store, "Brazil", Decimal::from(10000), &NetPayOptions::default())?;
//! println!("Net salary: {}", result.net_salary);
//! # Ok::<(), payroll_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
