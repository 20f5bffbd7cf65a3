use clap::Args;
use immo_rechner::valuation::{
    FinancialInput, GlobalRates, PropertyCondition, PropertyInput, PropertyType,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Mortgage interest in percent assumed when the owner leaves the rate open.
pub(crate) const DEFAULT_MORTGAGE_RATE: f64 = 3.5;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Property attributes as entered in the calculator form or on the command line.
#[derive(Args, Debug, Clone, Deserialize)]
pub(crate) struct PropertyFields {
    /// Living area in square metres
    #[arg(long)]
    pub(crate) size: f64,
    /// Postal code; the first digit selects the price region
    #[arg(long)]
    pub(crate) zip_code: String,
    /// new | renovated | good | needs_renovation
    #[arg(long, value_parser = parse_condition)]
    pub(crate) condition: PropertyCondition,
    /// apartment | house | commercial
    #[arg(long, value_parser = parse_property_type)]
    pub(crate) property_type: PropertyType,
    /// Feature identifier such as balcony or garden (repeatable)
    #[arg(long = "feature")]
    #[serde(default)]
    pub(crate) features: Vec<String>,
    /// Construction year
    #[arg(long)]
    #[serde(default)]
    pub(crate) year_built: Option<i32>,
    /// Number of rooms
    #[arg(long)]
    #[serde(default)]
    pub(crate) rooms: Option<u32>,
}

impl PropertyFields {
    pub(crate) fn into_input(self) -> PropertyInput {
        PropertyInput {
            size: self.size,
            zip_code: self.zip_code,
            condition: self.condition,
            property_type: self.property_type,
            features: self.features.into_iter().collect(),
            year_built: self.year_built,
            rooms: self.rooms,
        }
    }
}

/// Owner finances for the sell-vs-rent comparison. Rates are percentages.
#[derive(Args, Debug, Clone, Deserialize)]
pub(crate) struct FinancialFields {
    /// Current market value of the property
    #[arg(long)]
    pub(crate) property_value: f64,
    /// Outstanding mortgage balance (defaults to 0)
    #[arg(long)]
    #[serde(default)]
    pub(crate) remaining_mortgage: Option<f64>,
    /// Mortgage interest rate (defaults to 3.5)
    #[arg(long)]
    #[serde(default)]
    pub(crate) mortgage_rate: Option<f64>,
    /// Years the owner has held the property (defaults to 0)
    #[arg(long)]
    #[serde(default)]
    pub(crate) holding_period_years: Option<u32>,
    /// Expected annual appreciation (defaults to the configured appreciation rate)
    #[arg(long)]
    #[serde(default)]
    pub(crate) expected_appreciation: Option<f64>,
    /// Maintenance cost as a share of property value
    #[arg(long)]
    #[serde(default)]
    pub(crate) maintenance_rate: Option<f64>,
    /// Vacancy loss as a share of gross rent
    #[arg(long)]
    #[serde(default)]
    pub(crate) vacancy_rate: Option<f64>,
    /// Broker commission as a share of the sale price
    #[arg(long)]
    #[serde(default)]
    pub(crate) broker_commission: Option<f64>,
}

impl FinancialFields {
    pub(crate) fn into_financial(self, rates: &GlobalRates) -> FinancialInput {
        FinancialInput {
            property_value: self.property_value,
            remaining_mortgage: self.remaining_mortgage.unwrap_or(0.0),
            mortgage_rate: self.mortgage_rate.unwrap_or(DEFAULT_MORTGAGE_RATE),
            holding_period_years: self.holding_period_years.unwrap_or(0),
            appreciation_rate: self
                .expected_appreciation
                .unwrap_or(rates.appreciation_rate),
            maintenance_rate: self.maintenance_rate,
            vacancy_rate: self.vacancy_rate,
            broker_commission_rate: self.broker_commission,
        }
    }
}

pub(crate) fn parse_condition(raw: &str) -> Result<PropertyCondition, String> {
    let wanted = raw.trim();
    PropertyCondition::ordered()
        .into_iter()
        .find(|condition| condition.as_str().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            format!("unknown condition '{raw}' (expected new, renovated, good or needs_renovation)")
        })
}

pub(crate) fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    let wanted = raw.trim();
    PropertyType::ordered()
        .into_iter()
        .find(|property_type| property_type.as_str().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            format!("unknown property type '{raw}' (expected apartment, house or commercial)")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_enum_flags_case_insensitively() {
        assert_eq!(
            parse_condition(" Needs_Renovation "),
            Ok(PropertyCondition::NeedsRenovation)
        );
        assert_eq!(parse_property_type("HOUSE"), Ok(PropertyType::House));
        assert!(parse_condition("derelict").is_err());
        assert!(parse_property_type("castle").is_err());
    }

    #[test]
    fn financial_fields_fill_missing_values_with_defaults() {
        let fields = FinancialFields {
            property_value: 250_000.0,
            remaining_mortgage: None,
            mortgage_rate: None,
            holding_period_years: None,
            expected_appreciation: None,
            maintenance_rate: Some(2.0),
            vacancy_rate: None,
            broker_commission: None,
        };
        let rates = GlobalRates {
            interest_rate: 4.1,
            appreciation_rate: 1.5,
            rent_increase_rate: 2.0,
        };

        let financial = fields.into_financial(&rates);

        assert_eq!(financial.remaining_mortgage, 0.0);
        assert_eq!(financial.mortgage_rate, DEFAULT_MORTGAGE_RATE);
        assert_eq!(financial.appreciation_rate, 1.5);
        assert_eq!(financial.holding_period_years, 0);
        assert_eq!(financial.maintenance_rate, Some(2.0));
        assert_eq!(financial.vacancy_rate, None);
    }

    #[test]
    fn explicit_mortgage_rate_wins_over_default() {
        let fields: FinancialFields = serde_json::from_str(
            r#"{ "property_value": 250000.0, "mortgage_rate": 4.8 }"#,
        )
        .expect("fields parse");

        let financial = fields.into_financial(&GlobalRates::default());

        assert_eq!(financial.mortgage_rate, 4.8);
        assert_eq!(financial.appreciation_rate, 2.0);
    }

    #[test]
    fn property_fields_deduplicate_features() {
        let fields: PropertyFields = serde_json::from_str(
            r#"{ "size": 72.5, "zip_code": "50667", "condition": "good",
                 "property_type": "apartment", "features": ["balcony", "balcony", "cellar"] }"#,
        )
        .expect("fields parse");

        let input = fields.into_input();

        assert_eq!(input.features.len(), 2);
        assert_eq!(input.year_built, None);
        assert_eq!(input.region_key(), "5");
    }
}
