use crate::valuation::domain::{FinancialInput, PropertyCondition, PropertyInput, PropertyType};
use crate::valuation::matrix::{PricingConfiguration, RateTable};

pub(super) fn standard_matrix() -> PricingConfiguration {
    PricingConfiguration::standard()
}

/// Matrix with a single region priced at `base_price` and no other entries.
pub(super) fn single_region_matrix(region: &str, base_price: f64) -> PricingConfiguration {
    PricingConfiguration {
        base_prices: RateTable::new().with(region, base_price),
        ..PricingConfiguration::empty()
    }
}

/// 80 m² apartment in region 4 (base 11.00), good condition, balcony, built 2010.
pub(super) fn reference_apartment() -> PropertyInput {
    PropertyInput::new(
        80.0,
        "40210",
        PropertyCondition::Good,
        PropertyType::Apartment,
    )
    .with_features(["balcony"])
    .built_in(2010)
    .with_rooms(3)
}

/// 100 m² property in region 1; with [`single_region_matrix`] at 15.00 it rents for 1 500 a month.
pub(super) fn plain_property() -> PropertyInput {
    PropertyInput::new(
        100.0,
        "10115",
        PropertyCondition::Good,
        PropertyType::Apartment,
    )
}

pub(super) fn financial(property_value: f64) -> FinancialInput {
    FinancialInput {
        property_value,
        remaining_mortgage: 0.0,
        mortgage_rate: 3.5,
        holding_period_years: 12,
        appreciation_rate: 2.0,
        maintenance_rate: None,
        vacancy_rate: None,
        broker_commission_rate: None,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
