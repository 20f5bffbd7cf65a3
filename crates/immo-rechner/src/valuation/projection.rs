//! Year-by-year keep-versus-sell projection.
//!
//! Rent grows at a fixed 2 % per year and the mortgage is paid down in a straight
//! line over 25 years. Neither follows the configured rent-increase rate or the
//! owner's actual mortgage terms; callers comparing against older reports depend
//! on these figures staying as they are.

use super::domain::round2;
use serde::{Deserialize, Serialize};

pub const PROJECTION_YEARS: u32 = 30;
pub const REPORTED_YEARS: usize = 15;
pub const RENT_GROWTH_RATE: f64 = 0.02;
pub const AMORTIZATION_YEARS: f64 = 25.0;

/// Inputs of a projection. Rates are fractions, not percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInputs {
    pub property_value: f64,
    pub remaining_mortgage: f64,
    pub appreciation_rate: f64,
    pub broker_commission_rate: f64,
    pub net_annual_income: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    pub year: u32,
    pub property_value: f64,
    pub cumulative_rental_income: f64,
    pub net_sale_proceeds: f64,
    pub keep_total_value: f64,
}

impl ProjectionYear {
    fn rounded(&self) -> Self {
        Self {
            year: self.year,
            property_value: round2(self.property_value),
            cumulative_rental_income: round2(self.cumulative_rental_income),
            net_sale_proceeds: round2(self.net_sale_proceeds),
            keep_total_value: round2(self.keep_total_value),
        }
    }
}

/// Full-precision projection over every year of the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub years: Vec<ProjectionYear>,
    pub break_even_year: Option<u32>,
}

impl Projection {
    /// The leading years shown to the owner, rounded for display.
    pub fn reported(&self) -> Vec<ProjectionYear> {
        self.years
            .iter()
            .take(REPORTED_YEARS)
            .map(ProjectionYear::rounded)
            .collect()
    }
}

pub fn project(inputs: &ProjectionInputs) -> Projection {
    let mut years = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut cumulative_rental = 0.0;
    let mut break_even_year = None;

    for year in 1..=PROJECTION_YEARS {
        let exponent = year as i32;
        let future_value = inputs.property_value * (1.0 + inputs.appreciation_rate).powi(exponent);

        let year_rental = inputs.net_annual_income * (1.0 + RENT_GROWTH_RATE).powi(exponent - 1);
        cumulative_rental += year_rental;

        let amortized = year as f64 * inputs.remaining_mortgage / AMORTIZATION_YEARS;
        let future_mortgage = (inputs.remaining_mortgage - amortized).max(0.0);
        let future_sale_costs = future_value * inputs.broker_commission_rate;
        let future_net_sale = future_value - future_mortgage - future_sale_costs;
        let keep_value = cumulative_rental + future_value - future_mortgage;

        if break_even_year.is_none() && cumulative_rental >= future_net_sale {
            break_even_year = Some(year);
        }

        years.push(ProjectionYear {
            year,
            property_value: future_value,
            cumulative_rental_income: cumulative_rental,
            net_sale_proceeds: future_net_sale,
            keep_total_value: keep_value,
        });
    }

    Projection {
        years,
        break_even_year,
    }
}
