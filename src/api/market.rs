//! Market analysis endpoints.
//!
//! Callers supply the already-fetched price history; the handlers only
//! validate it and run the indicator engine and scorer.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiResponse;
use crate::config::MarketQuery;
use crate::error::Result;
use crate::services::{analyze, MarketAnalysis};
use crate::types::{IndicatorSnapshot, LookbackPeriod, PriceBar, PriceSeries};
use crate::AppState;

/// Body for `POST /api/market/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub stock: String,
    /// One of 1mo, 3mo, 6mo, 1y, 2y, 5y, max.
    pub period: Option<String>,
    pub bars: Vec<PriceBar>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub symbol: String,
    pub period: LookbackPeriod,
    #[serde(flatten)]
    pub analysis: MarketAnalysis,
}

/// Body for `POST /api/market/indicators`.
#[derive(Debug, Deserialize)]
pub struct IndicatorsRequest {
    pub bars: Vec<PriceBar>,
}

/// Indicator values for one bar.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPoint {
    pub time: i64,
    pub close: f64,
    #[serde(flatten)]
    pub snapshot: IndicatorSnapshot,
}

/// Create the market router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_market))
        .route("/indicators", post(indicators))
}

/// POST /api/market/analyze
async fn analyze_market(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>> {
    let query = MarketQuery::parse(
        &request.stock,
        request.period.as_deref(),
        state.config.default_period,
    )?;
    let series = PriceSeries::new(request.bars)?.window(query.period);
    let analysis = analyze(&series, &state.engine)?;

    info!(
        "{} over {}: {}",
        query.symbol,
        query.period.as_str(),
        analysis.signal
    );

    Ok(Json(ApiResponse::new(AnalyzeResponse {
        symbol: query.symbol.to_string(),
        period: query.period,
        analysis,
    })))
}

/// POST /api/market/indicators
async fn indicators(
    State(state): State<AppState>,
    Json(request): Json<IndicatorsRequest>,
) -> Result<Json<ApiResponse<Vec<SnapshotPoint>>>> {
    let series = PriceSeries::new(request.bars)?;
    let points = series
        .bars()
        .iter()
        .zip(state.engine.compute(&series))
        .map(|(bar, snapshot)| SnapshotPoint {
            time: bar.time,
            close: bar.close,
            snapshot,
        })
        .collect();

    Ok(Json(ApiResponse::new(points)))
}
