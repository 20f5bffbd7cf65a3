use super::domain::{round2, FinancialInput, PropertyInput, ValuationError};
use super::matrix::PricingConfiguration;
use super::projection::{project, ProjectionInputs, ProjectionYear};
use super::recommendation::{recommend, Recommendation, RecommendationSignals};
use super::rental::{RentalFigures, RentalResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Holding periods shorter than this may trigger speculation tax on a sale.
pub const SPECULATION_TAX_HOLDING_YEARS: u32 = 10;

pub const SPECULATION_TAX_NOTE: &str =
    "Note: Speculation tax may apply for properties held less than 10 years.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleScenario {
    pub property_value: f64,
    pub sale_costs: f64,
    pub remaining_mortgage: f64,
    pub net_proceeds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalScenario {
    pub gross_annual_rent: f64,
    pub vacancy_loss: f64,
    pub maintenance_cost: f64,
    pub net_annual_rent: f64,
    pub mortgage_interest: f64,
    pub net_annual_income: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Yields {
    pub gross: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub rental: RentalResult,
    pub sale: SaleScenario,
    pub rental_scenario: RentalScenario,
    pub yields: Yields,
    pub projection: Vec<ProjectionYear>,
    pub break_even_year: Option<u32>,
    pub speculation_tax_applies: bool,
    pub speculation_tax_note: Option<String>,
    pub recommendation: Recommendation,
}

/// Operating-cost rates as fractions, owner overrides taking precedence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OperatingRates {
    pub(crate) maintenance: f64,
    pub(crate) vacancy: f64,
    pub(crate) broker_commission: f64,
}

impl OperatingRates {
    pub(crate) fn resolve(financial: &FinancialInput, config: &PricingConfiguration) -> Self {
        let defaults = &config.operating_costs;
        Self {
            maintenance: financial
                .maintenance_rate
                .unwrap_or(defaults.maintenance_rate)
                / 100.0,
            vacancy: financial.vacancy_rate.unwrap_or(defaults.vacancy_rate) / 100.0,
            broker_commission: financial
                .broker_commission_rate
                .unwrap_or(defaults.broker_commission_rate)
                / 100.0,
        }
    }
}

pub fn calculate_comparison(
    input: &PropertyInput,
    financial: &FinancialInput,
    config: &PricingConfiguration,
) -> Result<ComparisonResult, ValuationError> {
    let figures = RentalFigures::compute(input, config)?;
    financial.validate()?;

    let rates = OperatingRates::resolve(financial, config);
    let property_value = financial.property_value;
    let remaining_mortgage = financial.remaining_mortgage;

    let gross_annual_rent = figures.annual_rent;
    let vacancy_loss = gross_annual_rent * rates.vacancy;
    let maintenance_cost = property_value * rates.maintenance;
    let net_annual_rent = gross_annual_rent - vacancy_loss - maintenance_cost;
    let mortgage_interest = remaining_mortgage * (financial.mortgage_rate / 100.0);
    let net_annual_income = net_annual_rent - mortgage_interest;

    let gross_yield = gross_annual_rent / property_value * 100.0;
    let net_yield = net_annual_income / property_value * 100.0;

    let sale_costs = property_value * rates.broker_commission;
    let net_sale_proceeds = property_value - remaining_mortgage - sale_costs;

    let speculation_tax_applies = financial.holding_period_years < SPECULATION_TAX_HOLDING_YEARS;

    let projection = project(&ProjectionInputs {
        property_value,
        remaining_mortgage,
        appreciation_rate: financial.appreciation_rate / 100.0,
        broker_commission_rate: rates.broker_commission,
        net_annual_income,
    });

    let recommendation = recommend(&RecommendationSignals {
        net_yield,
        break_even_year: projection.break_even_year,
        speculation_tax_applies,
    });

    debug!(
        net_yield,
        break_even_year = ?projection.break_even_year,
        direction = ?recommendation.direction,
        score = recommendation.score,
        "computed sell-vs-rent comparison"
    );

    Ok(ComparisonResult {
        rental: figures.to_result(),
        sale: SaleScenario {
            property_value: round2(property_value),
            sale_costs: round2(sale_costs),
            remaining_mortgage: round2(remaining_mortgage),
            net_proceeds: round2(net_sale_proceeds),
        },
        rental_scenario: RentalScenario {
            gross_annual_rent: round2(gross_annual_rent),
            vacancy_loss: round2(vacancy_loss),
            maintenance_cost: round2(maintenance_cost),
            net_annual_rent: round2(net_annual_rent),
            mortgage_interest: round2(mortgage_interest),
            net_annual_income: round2(net_annual_income),
        },
        yields: Yields {
            gross: round2(gross_yield),
            net: round2(net_yield),
        },
        projection: projection.reported(),
        break_even_year: projection.break_even_year,
        speculation_tax_applies,
        speculation_tax_note: speculation_tax_applies.then(|| SPECULATION_TAX_NOTE.to_string()),
        recommendation,
    })
}
