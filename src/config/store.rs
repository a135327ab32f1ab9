//! The immutable configuration snapshot.
//!
//! A [`ConfigStore`] is built once by [`ConfigLoader`](super::ConfigLoader)
//! and only read afterwards. Every accessor resolves lookup misses to a
//! documented default instead of failing.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::error::EngineError;
use crate::models::{CountryProfile, TargetRange};

use super::types::{
    BasePolicy, ContributionTable, CountryInfo, CountryTables, EmployerCharge, FlatRate,
    NetPayRule, PayrollTaxConfig, SalaryCap, StiConfig, ThresholdTable, Translations,
};

/// Remuneration months factor used when a country has none configured.
pub const DEFAULT_MONTHS_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// A configuration document that failed to load and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLoadFailure {
    /// The document name (e.g. `"income_tax"`).
    pub table: String,
    /// Why it failed.
    pub error: EngineError,
}

/// Validated, read-only tax and contribution tables.
///
/// Populated stores come from [`ConfigLoader::load`](super::ConfigLoader::load),
/// which validates every table before it is stored.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ConfigStore;
/// use rust_decimal::Decimal;
///
/// let store = ConfigStore::default();
/// assert_eq!(store.months_factor("Atlantis"), Decimal::new(12, 0));
/// assert!(store.employer_charges("Atlantis").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    translations: Translations,
    countries: BTreeMap<String, CountryInfo>,
    country_tables: CountryTables,
    social_contribution: ContributionTable,
    income_tax: ThresholdTable,
    payroll_tax: PayrollTaxConfig,
    sti: StiConfig,
    load_failures: Vec<TableLoadFailure>,
}

impl ConfigStore {
    /// Replaces the translation strings.
    pub(crate) fn with_translations(mut self, translations: Translations) -> Self {
        self.translations = translations;
        self
    }

    /// Replaces the country metadata.
    pub(crate) fn with_countries(mut self, countries: BTreeMap<String, CountryInfo>) -> Self {
        self.countries = countries;
        self
    }

    /// Replaces the per-country tables.
    pub(crate) fn with_country_tables(mut self, tables: CountryTables) -> Self {
        self.country_tables = tables;
        self
    }

    /// Replaces the detailed-rule social contribution table.
    pub(crate) fn with_social_contribution(mut self, table: ContributionTable) -> Self {
        self.social_contribution = table;
        self
    }

    /// Replaces the detailed-rule income tax table.
    pub(crate) fn with_income_tax(mut self, table: ThresholdTable) -> Self {
        self.income_tax = table;
        self
    }

    /// Replaces the payroll-tax rule configuration.
    pub(crate) fn with_payroll_tax(mut self, config: PayrollTaxConfig) -> Self {
        self.payroll_tax = config;
        self
    }

    /// Replaces the STI target tables.
    pub(crate) fn with_sti(mut self, sti: StiConfig) -> Self {
        self.sti = sti;
        self
    }

    pub(super) fn with_load_failures(mut self, failures: Vec<TableLoadFailure>) -> Self {
        self.load_failures = failures;
        self
    }

    /// Documents that fell back to defaults during loading.
    pub fn load_failures(&self) -> &[TableLoadFailure] {
        &self.load_failures
    }

    /// Country keys with metadata, in alphabetical order.
    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    /// Presentation metadata for a country, defaulted when unknown.
    pub fn country_profile(&self, country: &str) -> CountryProfile {
        let info = self.countries.get(country);
        CountryProfile {
            name: country.to_string(),
            currency_symbol: info.map_or_else(|| "$".to_string(), |i| i.symbol.clone()),
            flag: info.map(|i| i.flag.clone()).unwrap_or_default(),
            remuneration_months_factor: self.months_factor(country),
        }
    }

    /// The remuneration months factor, 12 when not configured.
    pub fn months_factor(&self, country: &str) -> Decimal {
        self.country_tables
            .remuneration_months
            .get(country)
            .copied()
            .unwrap_or(DEFAULT_MONTHS_FACTOR)
    }

    /// The employer charges for a country, empty when not configured.
    pub fn employer_charges(&self, country: &str) -> &[EmployerCharge] {
        self.country_tables
            .employer_charges
            .get(country)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Which annual base a country's employer charges apply to.
    pub fn base_policy(&self, country: &str) -> BasePolicy {
        self.country_tables
            .base_policy
            .get(country)
            .copied()
            .unwrap_or_default()
    }

    /// The flat rates the generic rule applies, empty when not configured.
    pub fn flat_rates(&self, country: &str) -> &[FlatRate] {
        self.country_tables
            .flat_rates
            .get(country)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The monthly salary ceiling for a country's flat rate, if any.
    ///
    /// A cap matches every rate whose name contains the cap's `tax_name`.
    pub fn salary_cap(&self, country: &str, tax_name: &str) -> Option<Decimal> {
        self.country_tables
            .salary_caps
            .get(country)?
            .iter()
            .find(|cap| tax_name.contains(cap.tax_name.as_str()))
            .map(|cap| cap.monthly_cap)
    }

    /// The monthly salary ceilings of a country, empty when not configured.
    pub fn salary_caps(&self, country: &str) -> &[SalaryCap] {
        self.country_tables
            .salary_caps
            .get(country)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The net-pay rule registered for a country; generic when unlisted.
    pub fn net_pay_rule(&self, country: &str) -> NetPayRule {
        self.country_tables
            .net_pay_rules
            .get(country)
            .copied()
            .unwrap_or_default()
    }

    /// The detailed-rule social contribution table.
    pub fn social_contribution(&self) -> &ContributionTable {
        &self.social_contribution
    }

    /// The detailed-rule income tax table.
    pub fn income_tax(&self) -> &ThresholdTable {
        &self.income_tax
    }

    /// The payroll-tax rule configuration.
    pub fn payroll_tax(&self) -> &PayrollTaxConfig {
        &self.payroll_tax
    }

    /// The flat rate of a payroll-tax jurisdiction, zero when unknown.
    pub fn state_rate(&self, state: &str) -> Decimal {
        self.payroll_tax
            .state_rates
            .get(state)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Payroll-tax jurisdictions and their rates, alphabetically.
    pub fn state_rates(&self) -> &BTreeMap<String, Decimal> {
        &self.payroll_tax.state_rates
    }

    /// The STI band for an area and level, if configured.
    pub fn sti_range(&self, area: &str, level: &str) -> Option<TargetRange> {
        self.sti.ranges.get(area)?.get(level).copied()
    }

    /// STI areas with selectable levels, alphabetically.
    pub fn sti_areas(&self) -> impl Iterator<Item = &str> {
        self.sti.level_options.keys().map(String::as_str)
    }

    /// The selectable levels of an STI area, empty when unknown.
    pub fn sti_levels(&self, area: &str) -> &[String] {
        self.sti
            .level_options
            .get(area)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every configured STI band, by area alphabetically.
    ///
    /// Levels follow the area's selectable order, then any other configured
    /// level alphabetically.
    pub fn sti_bands(&self) -> Vec<(&str, Vec<(&str, TargetRange)>)> {
        let mut areas: Vec<_> = self.sti.ranges.iter().collect();
        areas.sort_unstable_by_key(|(area, _)| *area);

        areas
            .into_iter()
            .map(|(area, bands)| {
                let options = self.sti_levels(area);
                let mut levels: Vec<(&str, TargetRange)> = options
                    .iter()
                    .filter_map(|level| bands.get(level).map(|range| (level.as_str(), *range)))
                    .collect();
                let mut unlisted: Vec<(&str, TargetRange)> = bands
                    .iter()
                    .filter(|(level, _)| !options.contains(*level))
                    .map(|(level, range)| (level.as_str(), *range))
                    .collect();
                unlisted.sort_unstable_by_key(|(level, _)| *level);
                levels.extend(unlisted);
                (area.as_str(), levels)
            })
            .collect()
    }

    /// The translation strings of a language.
    pub fn translations(&self, language: &str) -> Option<&HashMap<String, String>> {
        self.translations.get(language)
    }

    /// Languages with translation strings.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }
}
