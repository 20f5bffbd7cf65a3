use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCondition {
    New,
    Renovated,
    Good,
    NeedsRenovation,
}

impl PropertyCondition {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::New,
            Self::Renovated,
            Self::Good,
            Self::NeedsRenovation,
        ]
    }

    /// Key used by the pricing matrix.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Renovated => "renovated",
            Self::Good => "good",
            Self::NeedsRenovation => "needs_renovation",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New build",
            Self::Renovated => "Renovated",
            Self::Good => "Good condition",
            Self::NeedsRenovation => "Needs renovation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Commercial,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Apartment, Self::House, Self::Commercial]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Commercial => "commercial",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Commercial => "Commercial",
        }
    }
}

/// Attributes of the property being valued, as entered by the lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    /// Living area in square metres.
    pub size: f64,
    /// Postal code or explicit region identifier; only the first character is used.
    pub zip_code: String,
    pub condition: PropertyCondition,
    pub property_type: PropertyType,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub year_built: Option<i32>,
    #[serde(default)]
    pub rooms: Option<u32>,
}

impl PropertyInput {
    pub fn new(
        size: f64,
        zip_code: impl Into<String>,
        condition: PropertyCondition,
        property_type: PropertyType,
    ) -> Self {
        Self {
            size,
            zip_code: zip_code.into(),
            condition,
            property_type,
            features: BTreeSet::new(),
            year_built: None,
            rooms: None,
        }
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    pub fn built_in(mut self, year: i32) -> Self {
        self.year_built = Some(year);
        self
    }

    pub fn with_rooms(mut self, rooms: u32) -> Self {
        self.rooms = Some(rooms);
        self
    }

    /// Single-character region discriminator, empty when no location was given.
    pub fn region_key(&self) -> &str {
        let trimmed = self.zip_code.trim();
        match trimmed.chars().next() {
            Some(first) => &trimmed[..first.len_utf8()],
            None => "",
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValuationError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ValuationError::InvalidInput {
                field: "size",
                value: self.size,
            });
        }
        Ok(())
    }
}

/// Financial situation of the owner, only needed for the sell-vs-rent comparison.
///
/// Rates are annual percentages (`3.5` means 3.5 %). Operating-cost rates left as
/// `None` fall back to the configured defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInput {
    pub property_value: f64,
    #[serde(default)]
    pub remaining_mortgage: f64,
    pub mortgage_rate: f64,
    #[serde(default)]
    pub holding_period_years: u32,
    pub appreciation_rate: f64,
    #[serde(default)]
    pub maintenance_rate: Option<f64>,
    #[serde(default)]
    pub vacancy_rate: Option<f64>,
    #[serde(default)]
    pub broker_commission_rate: Option<f64>,
}

impl FinancialInput {
    pub(crate) fn validate(&self) -> Result<(), ValuationError> {
        if !self.property_value.is_finite() || self.property_value <= 0.0 {
            return Err(ValuationError::InvalidFinancialInput {
                field: "property_value",
                requirement: "must be a positive finite amount",
                value: self.property_value,
            });
        }
        if !self.remaining_mortgage.is_finite() || self.remaining_mortgage < 0.0 {
            return Err(ValuationError::InvalidFinancialInput {
                field: "remaining_mortgage",
                requirement: "must be a finite amount of at least zero",
                value: self.remaining_mortgage,
            });
        }

        let rates = [
            ("mortgage_rate", self.mortgage_rate),
            ("appreciation_rate", self.appreciation_rate),
        ];
        for (field, value) in rates {
            if !value.is_finite() {
                return Err(ValuationError::InvalidFinancialInput {
                    field,
                    requirement: "must be a finite percentage",
                    value,
                });
            }
        }

        let overrides = [
            ("maintenance_rate", self.maintenance_rate),
            ("vacancy_rate", self.vacancy_rate),
            ("broker_commission_rate", self.broker_commission_rate),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ValuationError::InvalidFinancialInput {
                        field,
                        requirement: "must be a finite percentage of at least zero",
                        value,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Precondition failures surfaced by the engine. Missing configuration never errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error("invalid property input: {field} must be a positive finite number (got {value})")]
    InvalidInput { field: &'static str, value: f64 },
    #[error("invalid financial input: {field} {requirement} (got {value})")]
    InvalidFinancialInput {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

/// Rounds a monetary amount or percentage to two decimals for output.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
