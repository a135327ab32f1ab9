//! Generic flat-rate net-pay rule.

use rust_decimal::Decimal;

use crate::config::ConfigStore;
use crate::error::EngineResult;
use crate::models::{CalculationResult, LineItem};

use super::net_pay::{BASE_SALARY_LABEL, NetPayOptions, OTHER_DEDUCTIONS_LABEL};

/// Computes net pay from a country's ordered flat rates.
///
/// Each rate is applied to gross salary, or to the configured monthly cap
/// when one matches the rate's name and is lower.
pub(crate) fn calculate_generic_net(
    store: &ConfigStore,
    country: &str,
    gross_salary: Decimal,
    options: &NetPayOptions,
) -> EngineResult<CalculationResult> {
    let mut lines = vec![LineItem::earning(BASE_SALARY_LABEL, gross_salary)];

    for flat_rate in store.flat_rates(country) {
        let base = match store.salary_cap(country, &flat_rate.name) {
            Some(cap) => gross_salary.min(cap),
            None => gross_salary,
        };
        lines.push(LineItem::deduction(
            flat_rate.name.as_str(),
            base * flat_rate.rate,
        ));
    }

    if options.other_deductions > Decimal::ZERO {
        lines.push(LineItem::deduction(
            OTHER_DEDUCTIONS_LABEL,
            options.other_deductions,
        ));
    }

    CalculationResult::from_lines(lines, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CountryTables, FlatRate};
    use crate::error::EngineError;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rate(name: &str, rate: &str) -> FlatRate {
        FlatRate {
            name: name.to_string(),
            rate: dec(rate),
        }
    }

    fn mexico_store() -> ConfigStore {
        let tables = CountryTables {
            flat_rates: HashMap::from([(
                "Mexico".to_string(),
                vec![rate("IMSS", "0.0663"), rate("ISR", "0.15")],
            )]),
            ..CountryTables::default()
        };
        ConfigStore::default().with_country_tables(tables)
    }

    #[test]
    fn test_salary_cap_limits_matching_rate() {
        let result = calculate_generic_net(
            &mexico_store(),
            "Mexico",
            dec("50000"),
            &NetPayOptions::default(),
        )
        .unwrap();

        assert_eq!(result.line_items[1].label, "IMSS");
        assert_eq!(result.line_items[1].deduction, dec("218.825139"));
        assert_eq!(result.line_items[2].label, "ISR");
        assert_eq!(result.line_items[2].deduction, dec("7500"));
    }

    #[test]
    fn test_salary_cap_ignored_below_cap() {
        let result = calculate_generic_net(
            &mexico_store(),
            "Mexico",
            dec("3000"),
            &NetPayOptions::default(),
        )
        .unwrap();

        assert_eq!(result.line_items[1].deduction, dec("198.9"));
    }

    #[test]
    fn test_salary_cap_is_country_scoped() {
        let tables = CountryTables {
            flat_rates: HashMap::from([("Chile".to_string(), vec![rate("IMSS", "0.0663")])]),
            ..CountryTables::default()
        };
        let store = ConfigStore::default().with_country_tables(tables);

        let result =
            calculate_generic_net(&store, "Chile", dec("50000"), &NetPayOptions::default()).unwrap();

        assert_eq!(result.line_items[1].deduction, dec("3315"));
    }

    #[test]
    fn test_rates_keep_configured_order() {
        let result = calculate_generic_net(
            &mexico_store(),
            "Mexico",
            dec("1000"),
            &NetPayOptions {
                other_deductions: dec("10"),
                ..NetPayOptions::default()
            },
        )
        .unwrap();

        let labels: Vec<&str> = result.line_items.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec![BASE_SALARY_LABEL, "IMSS", "ISR", OTHER_DEDUCTIONS_LABEL]);
    }

    #[test]
    fn test_country_without_rates_keeps_gross() {
        let result = calculate_generic_net(
            &ConfigStore::default(),
            "Atlantis",
            dec("4200"),
            &NetPayOptions::default(),
        )
        .unwrap();

        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.net_salary, dec("4200"));
        assert_eq!(result.effective_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_deductions_are_rejected() {
        let options = NetPayOptions {
            other_deductions: Decimal::MAX,
            ..NetPayOptions::default()
        };

        let result = calculate_generic_net(&mexico_store(), "Mexico", Decimal::MAX, &options);

        assert_eq!(result, Err(EngineError::out_of_range("total_deductions")));
    }
}
