use super::domain::{PropertyCondition, PropertyType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base price per square metre for regions missing from the matrix.
pub const FALLBACK_BASE_PRICE: f64 = 11.00;
/// Multiplier applied for conditions or property types missing from the matrix.
pub const NEUTRAL_MULTIPLIER: f64 = 1.00;
/// Premium added for features missing from the matrix.
pub const NO_PREMIUM: f64 = 0.00;
/// Annual rents per purchase price for regions missing from the sale factor table.
pub const FALLBACK_SALE_FACTOR: f64 = 25.0;

/// Keyed table of rates that can only be read through a total lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<String, f64>);

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    /// Returns the configured value for `key`, or `default` when the key is absent.
    pub fn lookup_or(&self, key: &str, default: f64) -> f64 {
        self.0.get(key).copied().unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

/// Market-wide annual assumptions in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalRates {
    pub interest_rate: f64,
    pub appreciation_rate: f64,
    /// Kept for the administrator's matrix; the projection uses a fixed growth rate.
    pub rent_increase_rate: f64,
}

impl Default for GlobalRates {
    fn default() -> Self {
        Self {
            interest_rate: 3.0,
            appreciation_rate: 2.0,
            rent_increase_rate: 2.0,
        }
    }
}

/// Operating-cost rates in percent, used when the owner does not override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperatingCostDefaults {
    pub maintenance_rate: f64,
    pub vacancy_rate: f64,
    pub broker_commission_rate: f64,
}

impl Default for OperatingCostDefaults {
    fn default() -> Self {
        Self {
            maintenance_rate: 1.5,
            vacancy_rate: 3.0,
            broker_commission_rate: 3.57,
        }
    }
}

/// Administrator-maintained pricing matrix. Treated as immutable during a calculation.
///
/// Unknown keys are rejected, so a rate placed outside `rates` fails to load
/// instead of silently keeping the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfiguration {
    #[serde(default)]
    pub base_prices: RateTable,
    #[serde(default)]
    pub condition_multipliers: RateTable,
    #[serde(default)]
    pub type_multipliers: RateTable,
    #[serde(default)]
    pub feature_premiums: RateTable,
    #[serde(default)]
    pub sale_factors: RateTable,
    #[serde(default)]
    pub rates: GlobalRates,
    #[serde(default)]
    pub operating_costs: OperatingCostDefaults,
}

impl PricingConfiguration {
    /// Matrix with every table empty; every lookup resolves to its fallback.
    pub fn empty() -> Self {
        Self {
            base_prices: RateTable::new(),
            condition_multipliers: RateTable::new(),
            type_multipliers: RateTable::new(),
            feature_premiums: RateTable::new(),
            sale_factors: RateTable::new(),
            rates: GlobalRates::default(),
            operating_costs: OperatingCostDefaults::default(),
        }
    }

    /// Factory defaults shipped with the calculator.
    pub fn standard() -> Self {
        let base_prices = [
            ("0", 10.50),
            ("1", 18.50),
            ("2", 16.00),
            ("3", 11.50),
            ("4", 11.00),
            ("5", 11.50),
            ("6", 13.50),
            ("7", 13.00),
            ("8", 19.00),
            ("9", 10.00),
        ];
        let condition_multipliers = [
            (PropertyCondition::New, 1.25),
            (PropertyCondition::Renovated, 1.10),
            (PropertyCondition::Good, 1.00),
            (PropertyCondition::NeedsRenovation, 0.80),
        ];
        let type_multipliers = [
            (PropertyType::Apartment, 1.00),
            (PropertyType::House, 1.15),
            (PropertyType::Commercial, 0.85),
        ];
        let feature_premiums = [
            ("balcony", 0.50),
            ("terrace", 0.75),
            ("garden", 1.00),
            ("elevator", 0.30),
            ("parking", 0.40),
            ("garage", 0.60),
            ("cellar", 0.20),
            ("fitted_kitchen", 0.50),
            ("floor_heating", 0.40),
            ("guest_toilet", 0.25),
            ("barrier_free", 0.30),
        ];
        let sale_factors = [
            ("0", 21.0),
            ("1", 30.0),
            ("2", 28.0),
            ("3", 22.0),
            ("4", 23.0),
            ("5", 24.0),
            ("6", 27.0),
            ("7", 26.0),
            ("8", 35.0),
            ("9", 20.0),
        ];

        Self {
            base_prices: base_prices.into_iter().collect(),
            condition_multipliers: condition_multipliers
                .into_iter()
                .map(|(condition, value)| (condition.as_str(), value))
                .collect(),
            type_multipliers: type_multipliers
                .into_iter()
                .map(|(property_type, value)| (property_type.as_str(), value))
                .collect(),
            feature_premiums: feature_premiums.into_iter().collect(),
            sale_factors: sale_factors.into_iter().collect(),
            rates: GlobalRates::default(),
            operating_costs: OperatingCostDefaults::default(),
        }
    }

    pub fn base_price(&self, region_key: &str) -> f64 {
        self.base_prices.lookup_or(region_key, FALLBACK_BASE_PRICE)
    }

    pub fn condition_multiplier(&self, condition: PropertyCondition) -> f64 {
        self.condition_multipliers
            .lookup_or(condition.as_str(), NEUTRAL_MULTIPLIER)
    }

    pub fn type_multiplier(&self, property_type: PropertyType) -> f64 {
        self.type_multipliers
            .lookup_or(property_type.as_str(), NEUTRAL_MULTIPLIER)
    }

    pub fn feature_premium(&self, feature: &str) -> f64 {
        self.feature_premiums.lookup_or(feature, NO_PREMIUM)
    }

    pub fn sale_factor(&self, region_key: &str) -> f64 {
        self.sale_factors.lookup_or(region_key, FALLBACK_SALE_FACTOR)
    }

    /// Rejects matrices an administrator could not have meant: non-finite values,
    /// non-positive base prices or sale factors, negative multipliers, premiums or rates.
    pub fn validate(&self) -> Result<(), InvalidMatrixEntry> {
        check_table("base_prices", &self.base_prices, |value| value > 0.0)?;
        check_table("condition_multipliers", &self.condition_multipliers, |value| {
            value >= 0.0
        })?;
        check_table("type_multipliers", &self.type_multipliers, |value| value >= 0.0)?;
        check_table("feature_premiums", &self.feature_premiums, |value| value >= 0.0)?;
        check_table("sale_factors", &self.sale_factors, |value| value > 0.0)?;

        let scalars = [
            ("rates", "interest_rate", self.rates.interest_rate, true),
            ("rates", "appreciation_rate", self.rates.appreciation_rate, false),
            ("rates", "rent_increase_rate", self.rates.rent_increase_rate, false),
            (
                "operating_costs",
                "maintenance_rate",
                self.operating_costs.maintenance_rate,
                true,
            ),
            (
                "operating_costs",
                "vacancy_rate",
                self.operating_costs.vacancy_rate,
                true,
            ),
            (
                "operating_costs",
                "broker_commission_rate",
                self.operating_costs.broker_commission_rate,
                true,
            ),
        ];
        for (table, key, value, non_negative) in scalars {
            if !value.is_finite() || (non_negative && value < 0.0) {
                return Err(InvalidMatrixEntry {
                    table,
                    key: key.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }
}

fn check_table(
    table: &'static str,
    entries: &RateTable,
    accept: impl Fn(f64) -> bool,
) -> Result<(), InvalidMatrixEntry> {
    match entries
        .iter()
        .find(|(_, value)| !value.is_finite() || !accept(*value))
    {
        Some((key, value)) => Err(InvalidMatrixEntry {
            table,
            key: key.to_string(),
            value,
        }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("pricing matrix entry {table}.{key} has unusable value {value}")]
pub struct InvalidMatrixEntry {
    pub table: &'static str,
    pub key: String,
    pub value: f64,
}
