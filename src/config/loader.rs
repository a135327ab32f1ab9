//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! tables from a configuration directory into a [`ConfigStore`].

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};

use super::store::{ConfigStore, TableLoadFailure};
use super::types::{
    ContributionTable, CountryTables, PayrollTaxConfig, StiConfig, ThresholdTable, Translations,
};

/// Loads payroll configuration documents.
///
/// # Directory Structure
///
/// Each document may be stored as JSON or YAML; JSON wins when both exist.
/// ```text
/// config/
/// ├── i18n.json                 # Translation strings per language
/// ├── countries.json            # Flag and currency symbol per country
/// ├── country_tables.json       # Months factors, employer charges, flat rates, rules
/// ├── social_contribution.json  # Detailed-rule contribution brackets
/// ├── income_tax.json           # Detailed-rule income tax tiers
/// ├── payroll_tax.json          # Payroll-tax rule rates and state rates
/// └── sti_config.json           # STI target bands
/// ```
///
/// Loading never fails as a whole. A document that is missing, malformed or
/// invalid is replaced by its default, logged, and recorded in
/// [`ConfigStore::load_failures`].
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let store = ConfigLoader::load("./config");
/// for failure in store.load_failures() {
///     eprintln!("{}: {}", failure.table, failure.error);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads every configuration document from the specified directory.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigStore {
        let path = path.as_ref();
        let mut failures = Vec::new();

        let translations =
            Self::load_table(path, "i18n", &mut failures, Ok, default_translations);
        let countries = Self::load_table(path, "countries", &mut failures, Ok, Default::default);
        let country_tables = Self::load_table(
            path,
            "country_tables",
            &mut failures,
            CountryTables::validate,
            CountryTables::default,
        );
        let social_contribution = Self::load_table(
            path,
            "social_contribution",
            &mut failures,
            ContributionTable::validate,
            ContributionTable::default,
        );
        let income_tax = Self::load_table(
            path,
            "income_tax",
            &mut failures,
            ThresholdTable::validate,
            ThresholdTable::default,
        );
        let payroll_tax = Self::load_table(
            path,
            "payroll_tax",
            &mut failures,
            PayrollTaxConfig::validate,
            PayrollTaxConfig::default,
        );
        let sti = Self::load_table(
            path,
            "sti_config",
            &mut failures,
            StiConfig::validate,
            StiConfig::default,
        );

        info!(
            path = %path.display(),
            failed_tables = failures.len(),
            "Configuration loaded"
        );

        ConfigStore::default()
            .with_translations(translations)
            .with_countries(countries)
            .with_country_tables(country_tables)
            .with_social_contribution(social_contribution)
            .with_income_tax(income_tax)
            .with_payroll_tax(payroll_tax)
            .with_sti(sti)
            .with_load_failures(failures)
    }

    /// Loads and validates one document, falling back to its default.
    fn load_table<T, V, D>(
        dir: &Path,
        name: &str,
        failures: &mut Vec<TableLoadFailure>,
        validate: V,
        default: D,
    ) -> T
    where
        T: DeserializeOwned,
        V: FnOnce(T) -> EngineResult<T>,
        D: FnOnce() -> T,
    {
        match Self::load_document::<T>(dir, name).and_then(validate) {
            Ok(table) => {
                debug!(table = name, "Loaded configuration table");
                table
            }
            Err(error) => {
                warn!(
                    table = name,
                    error = %error,
                    "Configuration table unavailable, using defaults"
                );
                failures.push(TableLoadFailure {
                    table: name.to_string(),
                    error,
                });
                default()
            }
        }
    }

    /// Finds `<name>.json` or `<name>.yaml` in `dir` and parses it.
    fn load_document<T: DeserializeOwned>(dir: &Path, name: &str) -> EngineResult<T> {
        let json_path = dir.join(format!("{}.json", name));
        if json_path.exists() {
            let content = Self::read(&json_path)?;
            return serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: json_path.display().to_string(),
                message: e.to_string(),
            });
        }

        let yaml_path = dir.join(format!("{}.yaml", name));
        if yaml_path.exists() {
            let content = Self::read(&yaml_path)?;
            return serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: yaml_path.display().to_string(),
                message: e.to_string(),
            });
        }

        Err(EngineError::ConfigNotFound {
            path: json_path.display().to_string(),
        })
    }

    fn read(path: &Path) -> EngineResult<String> {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EngineError::ConfigNotFound {
                path: path.display().to_string(),
            },
            _ => EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("failed to read file: {}", e),
            },
        })
    }
}

fn default_translations() -> Translations {
    HashMap::from([(
        "English".to_string(),
        HashMap::from([("sidebar_title".to_string(), "Loading...".to_string())]),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetPayRule;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("payroll-engine-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_shipped_configuration_without_failures() {
        let store = ConfigLoader::load(config_path());

        assert!(
            store.load_failures().is_empty(),
            "Unexpected failures: {:?}",
            store.load_failures()
        );
        assert!(store.country_names().any(|c| c == "Brazil"));
    }

    #[test]
    fn test_shipped_detailed_rule_tables() {
        let store = ConfigLoader::load(config_path());

        assert_eq!(store.net_pay_rule("Brazil"), NetPayRule::Detailed);
        assert_eq!(store.social_contribution().contribution_cap, Some(dec("908.85")));
        assert_eq!(
            store.income_tax().per_dependent_deduction,
            Some(dec("189.59"))
        );
        assert_eq!(store.income_tax().tiers.last().unwrap().upper_bound, None);
    }

    #[test]
    fn test_shipped_months_factor_and_symbol() {
        let store = ConfigLoader::load(config_path());
        let profile = store.country_profile("Brazil");

        assert_eq!(profile.currency_symbol, "R$");
        assert_eq!(profile.remuneration_months_factor, dec("13.33"));
    }

    #[test]
    fn test_load_missing_directory_falls_back_to_defaults() {
        let store = ConfigLoader::load("/nonexistent/path");

        assert_eq!(store.load_failures().len(), 7);
        match &store.load_failures()[0].error {
            EngineError::ConfigNotFound { path } => assert!(path.contains("i18n.json")),
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
        assert!(store.translations("English").is_some());
        assert_eq!(store.months_factor("Brazil"), dec("12"));
        assert!(store.social_contribution().brackets.is_empty());
    }

    #[test]
    fn test_malformed_document_degrades_only_that_table() {
        let dir = scratch_dir();
        fs::write(dir.join("income_tax.json"), "{ not json").unwrap();
        fs::write(
            dir.join("countries.json"),
            r#"{"Chile": {"flag": "CL", "symbol": "CLP$"}}"#,
        )
        .unwrap();

        let store = ConfigLoader::load(&dir);

        let failure = store
            .load_failures()
            .iter()
            .find(|f| f.table == "income_tax")
            .unwrap();
        assert!(matches!(failure.error, EngineError::ConfigParseError { .. }));
        assert!(store.load_failures().iter().all(|f| f.table != "countries"));
        assert_eq!(store.country_profile("Chile").currency_symbol, "CLP$");
        assert!(store.income_tax().tiers.is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_table_is_reported() {
        let dir = scratch_dir();
        fs::write(
            dir.join("sti_config.json"),
            r#"{"ranges": {"Sales": {"Manager": [0.5, 0.1]}}}"#,
        )
        .unwrap();

        let store = ConfigLoader::load(&dir);

        let failure = store
            .load_failures()
            .iter()
            .find(|f| f.table == "sti_config")
            .unwrap();
        assert!(matches!(failure.error, EngineError::InvalidTable { .. }));
        assert_eq!(store.sti_range("Sales", "Manager"), None);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_yaml_document_is_loaded() {
        let dir = scratch_dir();
        fs::write(
            dir.join("payroll_tax.yaml"),
            "social_security_rate: 0.062\nstate_rates:\n  Oregon: 0.0875\n",
        )
        .unwrap();

        let store = ConfigLoader::load(&dir);

        assert!(store.load_failures().iter().all(|f| f.table != "payroll_tax"));
        assert_eq!(store.state_rate("Oregon"), dec("0.0875"));
        assert_eq!(store.payroll_tax().medicare_rate, dec("0.0145"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_unreadable_document_reports_io_error() {
        let dir = scratch_dir();
        fs::create_dir(dir.join("income_tax.json")).unwrap();
        fs::write(dir.join("sti_config.json"), [0xff, 0xfe, 0x7b]).unwrap();

        let store = ConfigLoader::load(&dir);

        for table in ["income_tax", "sti_config"] {
            let failure = store.load_failures().iter().find(|f| f.table == table).unwrap();
            match &failure.error {
                EngineError::ConfigParseError { path, message } => {
                    assert!(path.contains(table));
                    assert!(message.starts_with("failed to read file"), "{}", message);
                }
                other => panic!("Expected ConfigParseError for {}, got {:?}", table, other),
            }
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_loaded_tables_are_validated() {
        let dir = scratch_dir();
        fs::write(
            dir.join("social_contribution.json"),
            r#"{"brackets": [
                {"upper_bound": null, "rate": 0.14},
                {"upper_bound": 1412.00, "rate": 0.075}
            ]}"#,
        )
        .unwrap();
        fs::write(
            dir.join("payroll_tax.json"),
            r#"{"state_rates": {"Atlantis": 1.5}}"#,
        )
        .unwrap();

        let store = ConfigLoader::load(&dir);

        let bounds: Vec<Option<Decimal>> = store
            .social_contribution()
            .brackets
            .iter()
            .map(|b| b.upper_bound)
            .collect();
        assert_eq!(bounds, vec![Some(dec("1412.00")), None]);
        let failure = store
            .load_failures()
            .iter()
            .find(|f| f.table == "payroll_tax")
            .unwrap();
        assert!(matches!(failure.error, EngineError::InvalidTable { .. }));
        assert_eq!(store.state_rate("Atlantis"), Decimal::ZERO);

        fs::remove_dir_all(dir).unwrap();
    }
}
