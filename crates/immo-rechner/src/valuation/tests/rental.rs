use super::common::*;
use crate::valuation::domain::{PropertyCondition, PropertyInput, PropertyType, ValuationError};
use crate::valuation::rental::{calculate_rental_value, estimate_sale_value, MarketSegment};

#[test]
fn reference_apartment_matches_worked_example() {
    let result = calculate_rental_value(&reference_apartment(), &standard_matrix())
        .expect("rental value computes");

    assert_eq!(result.monthly_rent.estimate, 966.0);
    assert_eq!(result.monthly_rent.low, 821.1);
    assert_eq!(result.monthly_rent.high, 1110.9);
    assert_eq!(result.annual_rent, 11592.0);
    assert_eq!(result.price_per_area, 12.08);
    assert_eq!(result.market_position.percentile, 65);
    assert_eq!(result.market_position.segment, MarketSegment::AboveAverage);
    assert_eq!(result.market_position.label, "Above average");
    assert_eq!(result.factors.base_price, 11.0);
    assert_eq!(result.factors.condition_impact, 1.0);
    assert_eq!(result.factors.type_impact, 1.0);
    assert_eq!(result.factors.features_count, 1);
}

#[test]
fn repeated_calls_are_identical() {
    let matrix = standard_matrix();
    let input = reference_apartment().with_features(["garage", "cellar"]);

    let first = calculate_rental_value(&input, &matrix).expect("first call");
    let second = calculate_rental_value(&input, &matrix).expect("second call");

    assert_eq!(first, second);
}

#[test]
fn range_brackets_the_estimate() {
    let matrix = standard_matrix();
    let sizes = [28.0, 47.5, 73.3, 118.0, 133.0, 210.0];

    for size in sizes {
        let input = PropertyInput {
            size,
            ..reference_apartment()
        };
        let result = calculate_rental_value(&input, &matrix).expect("rental value computes");
        let rent = result.monthly_rent;

        assert!(rent.low <= rent.estimate && rent.estimate <= rent.high);
        assert!((rent.low - (rent.estimate * 0.85 * 100.0).round() / 100.0).abs() <= 0.011);
        assert!((rent.high - (rent.estimate * 1.15 * 100.0).round() / 100.0).abs() <= 0.011);
    }
}

#[test]
fn rent_grows_with_size_inside_a_band() {
    let matrix = standard_matrix();
    let rents: Vec<f64> = [65.0, 80.0, 95.0, 110.0]
        .into_iter()
        .map(|size| {
            let input = PropertyInput {
                size,
                ..reference_apartment()
            };
            calculate_rental_value(&input, &matrix)
                .expect("rental value computes")
                .monthly_rent
                .estimate
        })
        .collect();

    assert!(rents.windows(2).all(|pair| pair[0] < pair[1]), "{rents:?}");
}

#[test]
fn market_position_buckets_use_exclusive_upper_bounds() {
    let cases = [
        (0.5, 20),
        (0.8499, 20),
        (0.85, 35),
        (0.95, 50),
        (1.0, 50),
        (1.05, 65),
        (1.15, 80),
        (1.2499, 80),
        (1.25, 90),
        (3.0, 90),
    ];

    for (ratio, percentile) in cases {
        assert_eq!(
            MarketSegment::from_ratio(ratio).percentile(),
            percentile,
            "ratio {ratio}"
        );
    }
}

#[test]
fn new_build_lands_in_premium_segment() {
    let input = PropertyInput::new(90.0, "40210", PropertyCondition::New, PropertyType::Apartment);

    let result = calculate_rental_value(&input, &standard_matrix()).expect("rental value computes");

    assert_eq!(result.market_position.percentile, 90);
    assert_eq!(result.market_position.label, "Premium segment");
}

#[test]
fn needs_renovation_lands_below_average() {
    let input = PropertyInput::new(
        90.0,
        "40210",
        PropertyCondition::NeedsRenovation,
        PropertyType::Apartment,
    );

    let result = calculate_rental_value(&input, &standard_matrix()).expect("rental value computes");

    assert_eq!(result.market_position.segment, MarketSegment::BelowAverage);
}

#[test]
fn features_count_only_matched_features() {
    let input = reference_apartment().with_features(["sauna", "elevator"]);

    let result = calculate_rental_value(&input, &standard_matrix()).expect("rental value computes");

    assert_eq!(result.factors.features_count, 2);
}

#[test]
fn rejects_invalid_size() {
    let input = PropertyInput {
        size: 0.0,
        ..reference_apartment()
    };

    let err = calculate_rental_value(&input, &standard_matrix()).expect_err("zero size rejected");

    assert_eq!(
        err,
        ValuationError::InvalidInput {
            field: "size",
            value: 0.0
        }
    );
}

#[test]
fn sale_value_applies_regional_factor() {
    let estimate =
        estimate_sale_value(&reference_apartment(), &standard_matrix()).expect("estimate computes");

    assert_eq!(estimate.region_key, "4");
    assert_eq!(estimate.sale_factor, 23.0);
    assert_eq!(estimate.annual_rent, 11592.0);
    assert_eq!(estimate.indicative_value, 266_616.0);
}

#[test]
fn sale_value_falls_back_to_default_factor() {
    let estimate = estimate_sale_value(&plain_property(), &single_region_matrix("1", 15.0))
        .expect("estimate computes");

    assert_eq!(estimate.sale_factor, 25.0);
    assert_eq!(estimate.indicative_value, 450_000.0);
}

#[test]
fn zero_base_price_lands_in_average_segment() {
    let mut matrix = single_region_matrix("1", 0.0);
    matrix.feature_premiums.insert("balcony", 0.5);

    let bare =
        calculate_rental_value(&plain_property(), &matrix).expect("rental value computes");
    assert_eq!(bare.price_per_area, 0.0);
    assert_eq!(bare.market_position.segment, MarketSegment::Average);

    let with_balcony = plain_property().with_features(["balcony"]);
    let priced =
        calculate_rental_value(&with_balcony, &matrix).expect("rental value computes");
    assert_eq!(priced.price_per_area, 0.5);
    assert_eq!(priced.market_position.percentile, 50);
}
