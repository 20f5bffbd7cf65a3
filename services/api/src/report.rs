use crate::infra::{FinancialFields, PropertyFields};
use clap::Args;
use immo_rechner::config::AppConfig;
use immo_rechner::error::AppError;
use immo_rechner::valuation::{
    ComparisonResult, ProjectionYear, RentalResult, SaleValueEstimate, ValuationEngine,
};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    #[command(flatten)]
    pub(crate) property: PropertyFields,
    #[command(flatten)]
    pub(crate) financial: FinancialFields,
    /// Write the yearly projection to this CSV file
    #[arg(long)]
    pub(crate) projection_csv: Option<PathBuf>,
}

fn engine_from_config() -> Result<ValuationEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(ValuationEngine::new(config.pricing))
}

pub(crate) fn run_rental(args: PropertyFields) -> Result<(), AppError> {
    let engine = engine_from_config()?;
    let input = args.into_input();

    let result = engine.rental_value(&input)?;
    let sale_value = engine.sale_value(&input)?;

    print!("{}", render_rental(&result, &sale_value));
    Ok(())
}

pub(crate) fn run_comparison(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs {
        property,
        financial,
        projection_csv,
    } = args;

    let engine = engine_from_config()?;
    let input = property.into_input();
    let financial = financial.into_financial(&engine.config().rates);

    let result = engine.comparison(&input, &financial)?;
    print!("{}", render_comparison(&result));

    if let Some(path) = projection_csv {
        export_projection(&path, &result.projection)?;
        println!("\nProjection written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_matrix() -> Result<(), AppError> {
    let engine = engine_from_config()?;
    let rendered = serde_json::to_string_pretty(engine.config()).map_err(io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render_rental(result: &RentalResult, sale_value: &SaleValueEstimate) -> String {
    let rent = &result.monthly_rent;
    let factors = &result.factors;

    let lines = [
        "Rental valuation".to_string(),
        format!(
            "Monthly rent: {:.2} EUR (range {:.2} - {:.2})",
            rent.estimate, rent.low, rent.high
        ),
        format!("Annual rent: {:.2} EUR", result.annual_rent),
        format!("Price per m²: {:.2} EUR", result.price_per_area),
        format!(
            "Market position: {} ({}th percentile)",
            result.market_position.label, result.market_position.percentile
        ),
        String::new(),
        "Factors".to_string(),
        format!("- regional base price: {:.2} EUR/m²", factors.base_price),
        format!("- condition impact: x{:.2}", factors.condition_impact),
        format!("- property type impact: x{:.2}", factors.type_impact),
        format!("- priced features: {}", factors.features_count),
        String::new(),
        format!(
            "Indicative sale value: {:.2} EUR ({:.1}x annual rent, region {})",
            sale_value.indicative_value, sale_value.sale_factor, sale_value.region_key
        ),
    ];

    finish(lines)
}

pub(crate) fn render_comparison(result: &ComparisonResult) -> String {
    let rental = &result.rental_scenario;
    let sale = &result.sale;
    let recommendation = &result.recommendation;

    let mut lines = vec![
        "Sell vs. rent comparison".to_string(),
        format!(
            "Monthly rent estimate: {:.2} EUR",
            result.rental.monthly_rent.estimate
        ),
        String::new(),
        "Sale today".to_string(),
        format!("- property value: {:.2}", sale.property_value),
        format!("- sale costs: {:.2}", sale.sale_costs),
        format!("- remaining mortgage: {:.2}", sale.remaining_mortgage),
        format!("- net proceeds: {:.2}", sale.net_proceeds),
        String::new(),
        "Renting per year".to_string(),
        format!("- gross rent: {:.2}", rental.gross_annual_rent),
        format!("- vacancy loss: {:.2}", rental.vacancy_loss),
        format!("- maintenance: {:.2}", rental.maintenance_cost),
        format!("- mortgage interest: {:.2}", rental.mortgage_interest),
        format!("- net income: {:.2}", rental.net_annual_income),
        format!(
            "Yields: {:.2}% gross, {:.2}% net",
            result.yields.gross, result.yields.net
        ),
        match result.break_even_year {
            Some(year) => format!("Break-even: year {year}"),
            None => "Break-even: not within 30 years".to_string(),
        },
    ];
    lines.extend(result.speculation_tax_note.clone());

    lines.push(String::new());
    lines.push("Projection".to_string());
    lines.push(format!(
        "{:>4} {:>14} {:>14} {:>14} {:>14}",
        "year", "value", "rent income", "sale net", "keep total"
    ));
    lines.extend(result.projection.iter().map(|row| {
        format!(
            "{:>4} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            row.year,
            row.property_value,
            row.cumulative_rental_income,
            row.net_sale_proceeds,
            row.keep_total_value
        )
    }));

    lines.push(String::new());
    lines.push(format!(
        "Recommendation: {} (score {})",
        recommendation.summary, recommendation.score
    ));
    lines.extend(
        recommendation
            .factors
            .iter()
            .map(|factor| format!("- {factor}")),
    );

    finish(lines)
}

fn finish(lines: impl IntoIterator<Item = String>) -> String {
    lines
        .into_iter()
        .map(|mut line| {
            line.push('\n');
            line
        })
        .collect()
}

pub(crate) fn write_projection_csv<W: io::Write>(
    writer: W,
    rows: &[ProjectionYear],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn export_projection(path: &Path, rows: &[ProjectionYear]) -> Result<(), AppError> {
    let file = File::create(path)?;
    write_projection_csv(file, rows).map_err(io::Error::from)?;
    Ok(())
}
