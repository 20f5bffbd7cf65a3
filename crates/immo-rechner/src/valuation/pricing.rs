//! Resolution of a property's attributes into a price per square metre.
//!
//! The order of the steps matters: regional base price, condition and type
//! multipliers, additive feature premiums, then the construction-year and size
//! adjustments.

use super::domain::PropertyInput;
use super::matrix::PricingConfiguration;
use serde::Serialize;

/// Intermediate values of a price resolution, kept for the factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceResolution {
    pub region_key: String,
    pub base_price: f64,
    pub condition_multiplier: f64,
    pub type_multiplier: f64,
    pub feature_premium: f64,
    pub matched_features: usize,
    pub age_adjustment: f64,
    pub size_adjustment: f64,
    pub price_per_area: f64,
}

/// Resolved price per square metre at full precision.
pub fn resolve_price_per_area(input: &PropertyInput, config: &PricingConfiguration) -> f64 {
    resolve(input, config).price_per_area
}

pub fn resolve(input: &PropertyInput, config: &PricingConfiguration) -> PriceResolution {
    let region_key = input.region_key().to_string();
    let base_price = config.base_price(&region_key);
    let condition_multiplier = config.condition_multiplier(input.condition);
    let type_multiplier = config.type_multiplier(input.property_type);

    let mut price = base_price * condition_multiplier * type_multiplier;

    let mut feature_premium = 0.0;
    let mut matched_features = 0;
    for feature in &input.features {
        if config.feature_premiums.contains(feature) {
            matched_features += 1;
        }
        let premium = config.feature_premium(feature);
        feature_premium += premium;
        price += premium;
    }

    let age_adjustment = construction_year_adjustment(input.year_built);
    price *= age_adjustment;

    let size_adjustment = size_adjustment(input.size);
    price *= size_adjustment;

    PriceResolution {
        region_key,
        base_price,
        condition_multiplier,
        type_multiplier,
        feature_premium,
        matched_features,
        age_adjustment,
        size_adjustment,
        price_per_area: price,
    }
}

/// Fixed construction-year bands, highest first; pre-war buildings carry a premium.
/// A year of 0 means the year is unknown.
pub fn construction_year_adjustment(year_built: Option<i32>) -> f64 {
    match year_built {
        None | Some(0) => 1.00,
        Some(year) if year >= 2015 => 1.10,
        Some(year) if year >= 2000 => 1.05,
        Some(year) if year >= 1990 => 1.00,
        Some(year) if year >= 1970 => 0.95,
        Some(year) if year >= 1950 => 0.90,
        Some(_) => 1.05,
    }
}

/// Small units earn more per square metre, large ones less.
pub fn size_adjustment(size: f64) -> f64 {
    if size < 40.0 {
        1.15
    } else if size < 60.0 {
        1.08
    } else if size > 150.0 {
        0.90
    } else if size > 120.0 {
        0.95
    } else {
        1.00
    }
}
