use std::sync::Arc;
use std::thread;

use immo_rechner::valuation::{
    calculate_comparison, calculate_rental_value, resolve_price_per_area, FinancialInput,
    PricingConfiguration, PropertyCondition, PropertyInput, PropertyType,
    RecommendationDirection, ValuationEngine, ValuationError,
};

fn berlin_flat() -> PropertyInput {
    PropertyInput::new(
        55.0,
        "10435",
        PropertyCondition::Renovated,
        PropertyType::Apartment,
    )
    .with_features(["balcony", "elevator", "fitted_kitchen"])
    .built_in(1908)
    .with_rooms(2)
}

fn owner_finances() -> FinancialInput {
    FinancialInput {
        property_value: 320_000.0,
        remaining_mortgage: 80_000.0,
        mortgage_rate: 3.5,
        holding_period_years: 6,
        appreciation_rate: 2.0,
        maintenance_rate: None,
        vacancy_rate: None,
        broker_commission_rate: None,
    }
}

#[test]
fn engine_and_free_functions_agree() {
    let matrix = PricingConfiguration::standard();
    let engine = ValuationEngine::new(matrix.clone());
    let input = berlin_flat();

    assert_eq!(
        engine.price_per_area(&input),
        resolve_price_per_area(&input, &matrix)
    );
    assert_eq!(
        engine.rental_value(&input).expect("engine rental"),
        calculate_rental_value(&input, &matrix).expect("free rental")
    );
    assert_eq!(
        engine
            .comparison(&input, &owner_finances())
            .expect("engine comparison"),
        calculate_comparison(&input, &owner_finances(), &matrix).expect("free comparison")
    );
}

#[test]
fn berlin_pre_war_flat_is_priced_from_the_full_chain() {
    let engine = ValuationEngine::new(PricingConfiguration::standard());

    let result = engine.rental_value(&berlin_flat()).expect("rental value computes");

    // (18.50 * 1.10 * 1.00 + 0.50 + 0.30 + 0.50) * 1.05 (pre-war) * 1.08 (40-60 m²)
    let expected_price = (18.5 * 1.1 + 1.3) * 1.05 * 1.08;
    assert!((result.price_per_area - expected_price).abs() < 0.006);
    let expected_rent = 55.0 * expected_price;
    assert!((result.monthly_rent.estimate - expected_rent).abs() < 0.006);
    assert_eq!(result.factors.features_count, 3);
    assert_eq!(result.market_position.percentile, 90);
}

#[test]
fn comparison_serializes_with_documented_field_names() {
    let engine = ValuationEngine::new(PricingConfiguration::standard());

    let result = engine
        .comparison(&berlin_flat(), &owner_finances())
        .expect("comparison computes");
    let json = serde_json::to_value(&result).expect("result serializes");

    for field in [
        "rental",
        "sale",
        "rental_scenario",
        "yields",
        "projection",
        "break_even_year",
        "speculation_tax_applies",
        "speculation_tax_note",
        "recommendation",
    ] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
    assert_eq!(json["projection"].as_array().map(Vec::len), Some(15));
    assert_eq!(json["rental"]["monthly_rent"]["estimate"], result.rental.monthly_rent.estimate);
    assert!(matches!(
        json["recommendation"]["direction"].as_str(),
        Some("rent" | "sell" | "neutral")
    ));
}

#[test]
fn short_holding_period_flags_speculation_tax() {
    let engine = ValuationEngine::new(PricingConfiguration::standard());

    let result = engine
        .comparison(&berlin_flat(), &owner_finances())
        .expect("comparison computes");

    assert!(result.speculation_tax_applies);
    assert!(result
        .recommendation
        .factors
        .iter()
        .any(|factor| factor.contains("speculation tax")));
    assert_ne!(result.recommendation.direction, RecommendationDirection::Sell);
}

#[test]
fn shared_engine_is_deterministic_across_threads() {
    let engine = Arc::new(ValuationEngine::new(PricingConfiguration::standard()));
    let baseline = engine
        .comparison(&berlin_flat(), &owner_finances())
        .expect("baseline computes");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.comparison(&berlin_flat(), &owner_finances()))
        })
        .collect();

    for handle in handles {
        let result = handle
            .join()
            .expect("worker finished")
            .expect("comparison computes");
        assert_eq!(result, baseline);
    }
}

#[test]
fn invalid_inputs_surface_distinct_errors() {
    let engine = ValuationEngine::new(PricingConfiguration::standard());

    let bad_size = PropertyInput {
        size: f64::NAN,
        ..berlin_flat()
    };
    assert!(matches!(
        engine.rental_value(&bad_size),
        Err(ValuationError::InvalidInput { .. })
    ));

    let bad_value = FinancialInput {
        property_value: -1.0,
        ..owner_finances()
    };
    assert!(matches!(
        engine.comparison(&berlin_flat(), &bad_value),
        Err(ValuationError::InvalidFinancialInput { .. })
    ));
}
