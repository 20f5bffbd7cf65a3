use super::domain::{round2, PropertyInput, ValuationError};
use super::matrix::PricingConfiguration;
use super::pricing::{resolve, PriceResolution};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const RANGE_LOW_FACTOR: f64 = 0.85;
const RANGE_HIGH_FACTOR: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSegment {
    BelowAverage,
    SlightlyBelowAverage,
    Average,
    AboveAverage,
    WellAboveAverage,
    Premium,
}

impl MarketSegment {
    pub const fn percentile(self) -> u8 {
        match self {
            Self::BelowAverage => 20,
            Self::SlightlyBelowAverage => 35,
            Self::Average => 50,
            Self::AboveAverage => 65,
            Self::WellAboveAverage => 80,
            Self::Premium => 90,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BelowAverage => "Below average",
            Self::SlightlyBelowAverage => "Slightly below average",
            Self::Average => "Average",
            Self::AboveAverage => "Above average",
            Self::WellAboveAverage => "Well above average",
            Self::Premium => "Premium segment",
        }
    }

    /// Buckets the ratio of resolved price to regional base price. Upper bounds are exclusive.
    pub fn from_ratio(ratio: f64) -> Self {
        const BUCKETS: [(f64, MarketSegment); 5] = [
            (0.85, MarketSegment::BelowAverage),
            (0.95, MarketSegment::SlightlyBelowAverage),
            (1.05, MarketSegment::Average),
            (1.15, MarketSegment::AboveAverage),
            (1.25, MarketSegment::WellAboveAverage),
        ];

        BUCKETS
            .iter()
            .find(|(upper, _)| ratio < *upper)
            .map(|(_, segment)| *segment)
            .unwrap_or(MarketSegment::Premium)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPosition {
    pub percentile: u8,
    pub segment: MarketSegment,
    pub label: String,
}

impl From<MarketSegment> for MarketPosition {
    fn from(segment: MarketSegment) -> Self {
        Self {
            percentile: segment.percentile(),
            segment,
            label: segment.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentRange {
    pub estimate: f64,
    pub low: f64,
    pub high: f64,
}

/// Which matrix entries shaped the estimate. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub base_price: f64,
    pub condition_impact: f64,
    pub type_impact: f64,
    pub features_count: usize,
}

/// Rental estimate as returned to callers; all amounts rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalResult {
    pub monthly_rent: RentRange,
    pub annual_rent: f64,
    pub price_per_area: f64,
    pub market_position: MarketPosition,
    pub factors: FactorBreakdown,
}

/// Purchase price implied by the regional multiple of annual rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleValueEstimate {
    pub region_key: String,
    pub sale_factor: f64,
    pub annual_rent: f64,
    pub indicative_value: f64,
}

/// Unrounded rental figures shared with the comparison.
pub(crate) struct RentalFigures {
    pub(crate) resolution: PriceResolution,
    pub(crate) monthly_rent: f64,
    pub(crate) annual_rent: f64,
}

impl RentalFigures {
    pub(crate) fn compute(
        input: &PropertyInput,
        config: &PricingConfiguration,
    ) -> Result<Self, ValuationError> {
        input.validate()?;

        let resolution = resolve(input, config);
        let monthly_rent = input.size * resolution.price_per_area;
        let annual_rent = monthly_rent * 12.0;

        debug!(
            region = %resolution.region_key,
            price_per_area = resolution.price_per_area,
            monthly_rent,
            "resolved rental figures"
        );

        Ok(Self {
            resolution,
            monthly_rent,
            annual_rent,
        })
    }

    pub(crate) fn to_result(&self) -> RentalResult {
        let resolution = &self.resolution;
        let ratio = market_ratio(resolution);

        RentalResult {
            monthly_rent: RentRange {
                estimate: round2(self.monthly_rent),
                low: round2(self.monthly_rent * RANGE_LOW_FACTOR),
                high: round2(self.monthly_rent * RANGE_HIGH_FACTOR),
            },
            annual_rent: round2(self.annual_rent),
            price_per_area: round2(resolution.price_per_area),
            market_position: MarketSegment::from_ratio(ratio).into(),
            factors: FactorBreakdown {
                base_price: resolution.base_price,
                condition_impact: resolution.condition_multiplier,
                type_impact: resolution.type_multiplier,
                features_count: resolution.matched_features,
            },
        }
    }
}

/// Resolved price relative to the regional base. A non-positive base yields the
/// neutral ratio, placing the property in the average segment.
fn market_ratio(resolution: &PriceResolution) -> f64 {
    let ratio = resolution.price_per_area / resolution.base_price;
    if resolution.base_price > 0.0 && ratio.is_finite() {
        ratio
    } else {
        warn!(
            region = %resolution.region_key,
            base_price = resolution.base_price,
            "base price unusable for market position, assuming average"
        );
        1.0
    }
}

pub fn calculate_rental_value(
    input: &PropertyInput,
    config: &PricingConfiguration,
) -> Result<RentalResult, ValuationError> {
    RentalFigures::compute(input, config).map(|figures| figures.to_result())
}

pub fn estimate_sale_value(
    input: &PropertyInput,
    config: &PricingConfiguration,
) -> Result<SaleValueEstimate, ValuationError> {
    let figures = RentalFigures::compute(input, config)?;
    let sale_factor = config.sale_factor(&figures.resolution.region_key);

    Ok(SaleValueEstimate {
        region_key: figures.resolution.region_key.clone(),
        sale_factor,
        annual_rent: round2(figures.annual_rent),
        indicative_value: round2(figures.annual_rent * sale_factor),
    })
}
