use crate::infra::{AppState, FinancialFields, PropertyFields};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use immo_rechner::error::AppError;
use immo_rechner::valuation::{
    ComparisonResult, PricingConfiguration, RentalResult, SaleValueEstimate, ValuationEngine,
    ValuationError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CalculationMode {
    Rental,
    Comparison,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComparisonRequest {
    #[serde(flatten)]
    pub(crate) property: PropertyFields,
    #[serde(flatten)]
    pub(crate) financial: FinancialFields,
}

#[derive(Debug, Serialize)]
pub(crate) struct RentalResponse {
    pub(crate) mode: CalculationMode,
    pub(crate) calculated_at: DateTime<Utc>,
    pub(crate) result: RentalResult,
    pub(crate) indicative_sale_value: SaleValueEstimate,
}

#[derive(Debug, Serialize)]
pub(crate) struct ComparisonResponse {
    pub(crate) mode: CalculationMode,
    pub(crate) calculated_at: DateTime<Utc>,
    pub(crate) result: ComparisonResult,
}

pub(crate) fn calculation_router(engine: Arc<ValuationEngine>) -> Router {
    Router::new()
        .route("/api/v1/calculate/rental", post(rental_endpoint))
        .route("/api/v1/calculate/comparison", post(comparison_endpoint))
        .route("/api/v1/matrix", get(matrix_endpoint))
        .with_state(engine)
}

pub(crate) fn with_calculation_routes(engine: Arc<ValuationEngine>) -> Router {
    calculation_router(engine)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rental_endpoint(
    State(engine): State<Arc<ValuationEngine>>,
    Json(payload): Json<PropertyFields>,
) -> Result<Json<RentalResponse>, AppError> {
    let input = payload.into_input();
    let result = engine.rental_value(&input).map_err(rejected)?;
    let indicative_sale_value = engine.sale_value(&input).map_err(rejected)?;

    info!(
        region = input.region_key(),
        monthly_rent = result.monthly_rent.estimate,
        "rental value calculated"
    );

    Ok(Json(RentalResponse {
        mode: CalculationMode::Rental,
        calculated_at: Utc::now(),
        result,
        indicative_sale_value,
    }))
}

pub(crate) async fn comparison_endpoint(
    State(engine): State<Arc<ValuationEngine>>,
    Json(payload): Json<ComparisonRequest>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let ComparisonRequest {
        property,
        financial,
    } = payload;
    let input = property.into_input();
    let financial = financial.into_financial(&engine.config().rates);

    let result = engine.comparison(&input, &financial).map_err(rejected)?;

    info!(
        region = input.region_key(),
        direction = ?result.recommendation.direction,
        score = result.recommendation.score,
        "comparison calculated"
    );

    Ok(Json(ComparisonResponse {
        mode: CalculationMode::Comparison,
        calculated_at: Utc::now(),
        result,
    }))
}

pub(crate) async fn matrix_endpoint(
    State(engine): State<Arc<ValuationEngine>>,
) -> Json<PricingConfiguration> {
    Json(engine.config().clone())
}

fn rejected(err: ValuationError) -> AppError {
    warn!(%err, "calculation rejected");
    AppError::from(err)
}
