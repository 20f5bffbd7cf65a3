use crate::valuation::recommendation::{
    recommend, RecommendationDirection, RecommendationSignals, SCORING_RULES,
};

fn signals(net_yield: f64, break_even_year: Option<u32>, speculation: bool) -> RecommendationSignals {
    RecommendationSignals {
        net_yield,
        break_even_year,
        speculation_tax_applies: speculation,
    }
}

fn fired_rules(signals: &RecommendationSignals) -> Vec<&'static str> {
    SCORING_RULES
        .iter()
        .filter(|rule| rule.evaluate(signals).is_some())
        .map(|rule| rule.key)
        .collect()
}

#[test]
fn strong_yield_and_quick_break_even_recommend_renting() {
    let recommendation = recommend(&signals(6.0, Some(4), false));

    assert_eq!(recommendation.score, 4);
    assert_eq!(recommendation.direction, RecommendationDirection::Rent);
    assert_eq!(
        recommendation.factors,
        vec![
            "Strong rental yield suggests renting could be profitable.".to_string(),
            "Quick break-even in 4 years supports rental strategy.".to_string(),
        ]
    );
    assert_eq!(recommendation.summary, RecommendationDirection::Rent.summary());
}

#[test]
fn low_yield_and_long_break_even_recommend_selling() {
    let recommendation = recommend(&signals(1.0, Some(15), false));

    assert_eq!(recommendation.score, -2);
    assert_eq!(recommendation.direction, RecommendationDirection::Sell);
    assert_eq!(recommendation.factors.len(), 2);
    assert!(recommendation.factors[1].contains("15 years"));
}

#[test]
fn moderate_yield_without_break_even_is_neutral() {
    let recommendation = recommend(&signals(4.0, None, false));

    assert_eq!(recommendation.score, 1);
    assert_eq!(recommendation.direction, RecommendationDirection::Neutral);
    assert_eq!(recommendation.factors.len(), 1);
}

#[test]
fn speculation_tax_tips_a_moderate_case_towards_renting() {
    let recommendation = recommend(&signals(4.0, None, true));

    assert_eq!(recommendation.score, 2);
    assert_eq!(recommendation.direction, RecommendationDirection::Rent);
    assert!(recommendation
        .factors
        .last()
        .is_some_and(|factor| factor.contains("speculation tax")));
}

#[test]
fn yield_rules_partition_at_three_and_five_percent() {
    assert_eq!(fired_rules(&signals(5.0, None, false)), vec!["strong_yield"]);
    assert_eq!(fired_rules(&signals(4.99, None, false)), vec!["moderate_yield"]);
    assert_eq!(fired_rules(&signals(3.0, None, false)), vec!["moderate_yield"]);
    assert_eq!(fired_rules(&signals(2.99, None, false)), vec!["low_yield"]);
    assert_eq!(fired_rules(&signals(-4.0, None, false)), vec!["low_yield"]);
}

#[test]
fn break_even_rules_partition_at_five_and_ten_years() {
    let cases = [
        (1, "quick_break_even"),
        (5, "quick_break_even"),
        (6, "moderate_break_even"),
        (10, "moderate_break_even"),
        (11, "long_break_even"),
        (30, "long_break_even"),
    ];

    for (year, expected) in cases {
        let fired = fired_rules(&signals(4.0, Some(year), false));
        assert_eq!(fired, vec!["moderate_yield", expected], "year {year}");
    }
}

#[test]
fn rule_deltas_match_direction_thresholds() {
    let deltas: Vec<(&str, i32)> = SCORING_RULES
        .iter()
        .map(|rule| (rule.key, rule.delta))
        .collect();

    assert_eq!(
        deltas,
        vec![
            ("strong_yield", 2),
            ("moderate_yield", 1),
            ("low_yield", -1),
            ("quick_break_even", 2),
            ("moderate_break_even", 1),
            ("long_break_even", -1),
            ("speculation_tax", 1),
        ]
    );
    assert_eq!(RecommendationDirection::from_score(2), RecommendationDirection::Rent);
    assert_eq!(RecommendationDirection::from_score(1), RecommendationDirection::Neutral);
    assert_eq!(RecommendationDirection::from_score(0), RecommendationDirection::Neutral);
    assert_eq!(RecommendationDirection::from_score(-1), RecommendationDirection::Sell);
}
