//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the JSON/YAML documents in a configuration
//! directory. Every optional field resolves to one default here, at load
//! time, so the calculators never need defensive lookups.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::TargetRange;

/// A single bracket of a cumulative contribution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Upper bound of the bracket. `None` is the unbounded top bracket.
    pub upper_bound: Option<Decimal>,
    /// Rate applied to the slice of income inside this bracket.
    pub rate: Decimal,
}

/// A progressive contribution table (e.g. a social security schedule).
///
/// Brackets are walked cumulatively: each one taxes only the slice of
/// income between the previous bound and its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTable {
    /// Brackets, sorted ascending by upper bound.
    pub brackets: Vec<Bracket>,
    /// Maximum contribution regardless of income.
    #[serde(default)]
    pub contribution_cap: Option<Decimal>,
}

impl ContributionTable {
    /// Sorts the brackets and checks the table invariants.
    ///
    /// Rejects rates outside `[0, 1]`, a negative cap, and more than one
    /// unbounded bracket.
    pub fn validate(mut self) -> EngineResult<Self> {
        let table = "social_contribution";
        self.brackets.sort_by(|a, b| cmp_bounds(a.upper_bound, b.upper_bound));

        if self.brackets.iter().any(|b| !is_fraction(b.rate)) {
            return Err(invalid(table, "bracket rates must be between 0 and 1"));
        }
        if self.brackets.iter().filter(|b| b.upper_bound.is_none()).count() > 1 {
            return Err(invalid(table, "only one bracket may be unbounded"));
        }
        if self.contribution_cap.is_some_and(|cap| cap < Decimal::ZERO) {
            return Err(invalid(table, "contribution cap must not be negative"));
        }
        Ok(self)
    }
}

/// A single tier of a threshold (income tax style) table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Upper bound of the tier. `None` matches any base.
    pub upper_bound: Option<Decimal>,
    /// Flat rate applied to the whole base when this tier matches.
    pub rate: Decimal,
    /// Fixed amount subtracted after applying the rate.
    #[serde(default)]
    pub fixed_deduction: Decimal,
}

/// A threshold lookup table: the first tier whose bound covers the base wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// Tiers, sorted ascending by upper bound.
    pub tiers: Vec<Tier>,
    /// Amount subtracted from the base per dependent.
    #[serde(default)]
    pub per_dependent_deduction: Option<Decimal>,
}

impl ThresholdTable {
    /// Sorts the tiers and checks the table invariants.
    ///
    /// A finite top tier is accepted but logged: bases above it fall back
    /// to zero tax.
    pub fn validate(mut self) -> EngineResult<Self> {
        let table = "income_tax";
        self.tiers.sort_by(|a, b| cmp_bounds(a.upper_bound, b.upper_bound));

        if self.tiers.iter().any(|t| !is_fraction(t.rate)) {
            return Err(invalid(table, "tier rates must be between 0 and 1"));
        }
        if self.tiers.iter().filter(|t| t.upper_bound.is_none()).count() > 1 {
            return Err(invalid(table, "only one tier may be unbounded"));
        }
        if self
            .per_dependent_deduction
            .is_some_and(|d| d < Decimal::ZERO)
        {
            return Err(invalid(table, "per-dependent deduction must not be negative"));
        }
        if let Some(top) = self.tiers.last().and_then(|t| t.upper_bound) {
            tracing::warn!(
                table,
                top_bound = %top,
                "top tier is bounded; bases above it resolve to zero tax"
            );
        }
        Ok(self)
    }
}

/// An employer charge levied on top of salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCharge {
    /// Display name of the charge.
    pub name: String,
    /// Rate in percent (20 means 20%).
    pub percent_rate: Decimal,
    /// Whether the annual bonus may be added to the charge base.
    #[serde(default)]
    pub applies_to_bonus: bool,
    /// Maximum annual base the rate is applied to.
    #[serde(default)]
    pub annual_cap: Option<Decimal>,
}

/// Which annual salary base employer charges are applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasePolicy {
    /// Twelve monthly salaries, ignoring statutory extra pay.
    TwelveMonths,
    /// Monthly salary times the country's remuneration months factor.
    #[default]
    WithBenefits,
}

/// The net-pay rule a country is computed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetPayRule {
    /// Bracketed social contribution plus threshold income tax.
    Detailed,
    /// Flat payroll withholdings with a capped social security base.
    PayrollTax,
    /// Flat rates from the country's rate table.
    #[default]
    Generic,
}

/// A named flat rate used by the generic net-pay rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRate {
    /// The tax or contribution name shown on the line item.
    pub name: String,
    /// Fraction of gross salary withheld.
    pub rate: Decimal,
}

/// A monthly salary ceiling for one of a country's flat rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryCap {
    /// Applies to every flat rate whose name contains this text.
    pub tax_name: String,
    /// Maximum monthly salary the rate is applied to.
    pub monthly_cap: Decimal,
}

/// Country metadata from `countries.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryInfo {
    /// Flag shown next to the country name.
    #[serde(default)]
    pub flag: String,
    /// Currency symbol.
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

/// Per-country tables from `country_tables.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryTables {
    /// Remuneration months factor per country (default 12).
    #[serde(default)]
    pub remuneration_months: HashMap<String, Decimal>,
    /// Ordered employer charges per country.
    #[serde(default)]
    pub employer_charges: HashMap<String, Vec<EmployerCharge>>,
    /// Employer-charge base policy per country.
    #[serde(default = "default_base_policy")]
    pub base_policy: HashMap<String, BasePolicy>,
    /// Ordered flat rates per country for the generic rule.
    #[serde(default)]
    pub flat_rates: HashMap<String, Vec<FlatRate>>,
    /// Monthly salary ceilings per country for the generic rule.
    #[serde(default = "default_salary_caps")]
    pub salary_caps: HashMap<String, Vec<SalaryCap>>,
    /// Net-pay rule registry; countries not listed use the generic rule.
    #[serde(default = "default_net_pay_rules")]
    pub net_pay_rules: HashMap<String, NetPayRule>,
}

impl Default for CountryTables {
    fn default() -> Self {
        Self {
            remuneration_months: HashMap::new(),
            employer_charges: HashMap::new(),
            base_policy: default_base_policy(),
            flat_rates: HashMap::new(),
            salary_caps: default_salary_caps(),
            net_pay_rules: default_net_pay_rules(),
        }
    }
}

impl CountryTables {
    /// Checks the per-country invariants.
    pub fn validate(self) -> EngineResult<Self> {
        let table = "country_tables";
        if let Some((country, _)) = self
            .remuneration_months
            .iter()
            .find(|(_, factor)| **factor < Decimal::ONE)
        {
            return Err(invalid(
                table,
                &format!("remuneration months factor for '{}' must be at least 1", country),
            ));
        }
        let negative_charge = self
            .employer_charges
            .values()
            .flatten()
            .find(|c| c.percent_rate < Decimal::ZERO || c.annual_cap.is_some_and(|cap| cap < Decimal::ZERO));
        if let Some(charge) = negative_charge {
            return Err(invalid(
                table,
                &format!("employer charge '{}' has a negative rate or cap", charge.name),
            ));
        }
        if let Some(rate) = self.flat_rates.values().flatten().find(|r| !is_fraction(r.rate)) {
            return Err(invalid(
                table,
                &format!("flat rate '{}' must be between 0 and 1", rate.name),
            ));
        }
        Ok(self)
    }
}

fn default_base_policy() -> HashMap<String, BasePolicy> {
    HashMap::from([
        ("United States".to_string(), BasePolicy::TwelveMonths),
        ("Canada".to_string(), BasePolicy::TwelveMonths),
    ])
}

fn default_salary_caps() -> HashMap<String, Vec<SalaryCap>> {
    HashMap::from([(
        "Mexico".to_string(),
        vec![SalaryCap {
            tax_name: "IMSS".to_string(),
            // 25 x UMA (108.57) per month
            monthly_cap: Decimal::new(330053, 2),
        }],
    )])
}

fn default_net_pay_rules() -> HashMap<String, NetPayRule> {
    HashMap::from([
        ("Brazil".to_string(), NetPayRule::Detailed),
        ("United States".to_string(), NetPayRule::PayrollTax),
    ])
}

/// Rates for the payroll-tax net-pay rule from `payroll_tax.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxConfig {
    /// Social security withholding rate.
    #[serde(default = "default_social_security_rate")]
    pub social_security_rate: Decimal,
    /// Annual wage base the social security rate stops at.
    #[serde(default = "default_social_security_wage_base")]
    pub social_security_wage_base: Decimal,
    /// Uncapped medicare withholding rate.
    #[serde(default = "default_medicare_rate")]
    pub medicare_rate: Decimal,
    /// Flat income tax rate per state.
    #[serde(default)]
    pub state_rates: BTreeMap<String, Decimal>,
}

impl Default for PayrollTaxConfig {
    fn default() -> Self {
        Self {
            social_security_rate: default_social_security_rate(),
            social_security_wage_base: default_social_security_wage_base(),
            medicare_rate: default_medicare_rate(),
            state_rates: BTreeMap::new(),
        }
    }
}

impl PayrollTaxConfig {
    /// Checks that every rate is in `[0, 1]` and the wage base is
    /// non-negative.
    pub fn validate(self) -> EngineResult<Self> {
        let table = "payroll_tax";
        if !is_fraction(self.social_security_rate)
            || !is_fraction(self.medicare_rate)
            || self.social_security_wage_base < Decimal::ZERO
        {
            return Err(invalid(
                table,
                "rates must be between 0 and 1 and the wage base must not be negative",
            ));
        }
        if let Some((state, _)) = self.state_rates.iter().find(|(_, r)| !is_fraction(**r)) {
            return Err(invalid(
                table,
                &format!("state rate for '{}' must be between 0 and 1", state),
            ));
        }
        Ok(self)
    }
}

fn default_social_security_rate() -> Decimal {
    Decimal::new(62, 3)
}

fn default_social_security_wage_base() -> Decimal {
    Decimal::new(168_600, 0)
}

fn default_medicare_rate() -> Decimal {
    Decimal::new(145, 4)
}

/// STI target bands from `sti_config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StiConfig {
    /// Area -> level -> `[min, max]` target ratio.
    #[serde(default)]
    pub ranges: HashMap<String, HashMap<String, TargetRange>>,
    /// Area -> ordered selectable levels.
    #[serde(default)]
    pub level_options: BTreeMap<String, Vec<String>>,
}

impl StiConfig {
    /// Checks that every band has `min <= max`.
    pub fn validate(self) -> EngineResult<Self> {
        for (area, levels) in &self.ranges {
            if let Some((level, _)) = levels.iter().find(|(_, r)| r.min > r.max) {
                return Err(invalid(
                    "sti_config",
                    &format!("range for '{}/{}' has min above max", area, level),
                ));
            }
        }
        Ok(self)
    }
}

/// Language -> key -> string, from `i18n.json`.
pub type Translations = HashMap<String, HashMap<String, String>>;

/// Orders bounds ascending with `None` (unbounded) last.
fn cmp_bounds(a: Option<Decimal>, b: Option<Decimal>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

fn invalid(table: &str, message: &str) -> EngineError {
    EngineError::InvalidTable {
        table: table.to_string(),
        message: message.to_string(),
    }
}
