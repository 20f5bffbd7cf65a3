//! Sell-versus-rent recommendation scoring.
//!
//! Each rule adds an integer delta to the score when its predicate holds and
//! contributes one factor statement. Rules are evaluated in table order; a
//! positive total favours renting, a negative one selling.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationDirection {
    Rent,
    Sell,
    Neutral,
}

impl RecommendationDirection {
    pub fn from_score(score: i32) -> Self {
        if score >= 2 {
            Self::Rent
        } else if score <= -1 {
            Self::Sell
        } else {
            Self::Neutral
        }
    }

    pub const fn summary(self) -> &'static str {
        match self {
            Self::Rent => "Based on our analysis, renting appears to be the more favorable option.",
            Self::Sell => {
                "Based on our analysis, selling may be the better choice for your situation."
            }
            Self::Neutral => {
                "Both options have merit. A consultation can help clarify the best path."
            }
        }
    }
}

/// Figures the scoring rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationSignals {
    pub net_yield: f64,
    pub break_even_year: Option<u32>,
    pub speculation_tax_applies: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub direction: RecommendationDirection,
    pub summary: String,
    pub score: i32,
    pub factors: Vec<String>,
}

pub struct ScoringRule {
    pub key: &'static str,
    pub delta: i32,
    applies: fn(&RecommendationSignals) -> bool,
    statement: fn(&RecommendationSignals) -> String,
}

impl ScoringRule {
    /// Delta and factor statement when the rule fires.
    pub fn evaluate(&self, signals: &RecommendationSignals) -> Option<(i32, String)> {
        if (self.applies)(signals) {
            Some((self.delta, (self.statement)(signals)))
        } else {
            None
        }
    }
}

pub const SCORING_RULES: [ScoringRule; 7] = [
    ScoringRule {
        key: "strong_yield",
        delta: 2,
        applies: |signals| signals.net_yield >= 5.0,
        statement: |_| "Strong rental yield suggests renting could be profitable.".to_string(),
    },
    ScoringRule {
        key: "moderate_yield",
        delta: 1,
        applies: |signals| signals.net_yield >= 3.0 && signals.net_yield < 5.0,
        statement: |_| "Moderate rental yield - consider your long-term goals.".to_string(),
    },
    ScoringRule {
        key: "low_yield",
        delta: -1,
        applies: |signals| signals.net_yield < 3.0,
        statement: |_| "Low rental yield may make selling more attractive.".to_string(),
    },
    ScoringRule {
        key: "quick_break_even",
        delta: 2,
        applies: |signals| matches!(signals.break_even_year, Some(year) if year <= 5),
        statement: |signals| {
            format!(
                "Quick break-even in {} years supports rental strategy.",
                signals.break_even_year.unwrap_or_default()
            )
        },
    },
    ScoringRule {
        key: "moderate_break_even",
        delta: 1,
        applies: |signals| matches!(signals.break_even_year, Some(year) if (6..=10).contains(&year)),
        statement: |signals| {
            format!(
                "Moderate break-even period of {} years.",
                signals.break_even_year.unwrap_or_default()
            )
        },
    },
    ScoringRule {
        key: "long_break_even",
        delta: -1,
        applies: |signals| matches!(signals.break_even_year, Some(year) if year > 10),
        statement: |signals| {
            format!(
                "Long break-even period of {} years may favor selling.",
                signals.break_even_year.unwrap_or_default()
            )
        },
    },
    ScoringRule {
        key: "speculation_tax",
        delta: 1,
        applies: |signals| signals.speculation_tax_applies,
        statement: |_| {
            "Selling now may incur speculation tax - consider waiting or renting.".to_string()
        },
    },
];

pub fn recommend(signals: &RecommendationSignals) -> Recommendation {
    let mut score = 0;
    let mut factors = Vec::new();

    for rule in &SCORING_RULES {
        if let Some((delta, statement)) = rule.evaluate(signals) {
            score += delta;
            factors.push(statement);
        }
    }

    let direction = RecommendationDirection::from_score(score);

    Recommendation {
        direction,
        summary: direction.summary().to_string(),
        score,
        factors,
    }
}
