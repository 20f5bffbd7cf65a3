//! Rental valuation and sell-versus-rent comparison.
//!
//! The free functions are the primary contract; [`ValuationEngine`] binds them to
//! one pricing matrix for callers that serve many requests.

pub mod comparison;
pub mod domain;
pub mod matrix;
pub mod pricing;
pub mod projection;
pub mod recommendation;
pub mod rental;

#[cfg(test)]
mod tests;

pub use comparison::{calculate_comparison, ComparisonResult, RentalScenario, SaleScenario, Yields};
pub use domain::{FinancialInput, PropertyCondition, PropertyInput, PropertyType, ValuationError};
pub use matrix::{
    GlobalRates, InvalidMatrixEntry, OperatingCostDefaults, PricingConfiguration, RateTable,
};
pub use pricing::resolve_price_per_area;
pub use projection::ProjectionYear;
pub use recommendation::{Recommendation, RecommendationDirection};
pub use rental::{
    calculate_rental_value, estimate_sale_value, FactorBreakdown, MarketPosition, MarketSegment,
    RentRange, RentalResult, SaleValueEstimate,
};

/// Stateless calculator bound to an immutable pricing matrix.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    config: PricingConfiguration,
}

impl ValuationEngine {
    pub fn new(config: PricingConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfiguration {
        &self.config
    }

    pub fn price_per_area(&self, input: &PropertyInput) -> f64 {
        resolve_price_per_area(input, &self.config)
    }

    pub fn rental_value(&self, input: &PropertyInput) -> Result<RentalResult, ValuationError> {
        calculate_rental_value(input, &self.config)
    }

    pub fn sale_value(&self, input: &PropertyInput) -> Result<SaleValueEstimate, ValuationError> {
        estimate_sale_value(input, &self.config)
    }

    pub fn comparison(
        &self,
        input: &PropertyInput,
        financial: &FinancialInput,
    ) -> Result<ComparisonResult, ValuationError> {
        calculate_comparison(input, financial, &self.config)
    }
}
