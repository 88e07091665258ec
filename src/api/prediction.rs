//! Profit probability endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::symbols;
use crate::types::PredictionResult;
use crate::AppState;

/// Symbol used when the request names none.
const DEFAULT_STOCK: &str = "RELIANCE";

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub stock: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub symbol: String,
    pub trades: usize,
    pub result: PredictionResult,
    pub message: String,
}

/// Create the prediction router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_prediction))
}

/// GET /api/prediction?stock=
async fn get_prediction(
    State(state): State<AppState>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<ApiResponse<PredictionResponse>>> {
    let symbol = symbols::normalize(query.stock.as_deref().unwrap_or(DEFAULT_STOCK))
        .ok_or_else(|| AppError::BadRequest("stock must not be empty".to_string()))?;

    let records = state.trade_store.records_for(&symbol)?;
    let result = state.predictor.fit_and_predict(&records);

    Ok(Json(ApiResponse::new(PredictionResponse {
        message: result.message(&symbol),
        trades: records.len(),
        symbol,
        result,
    })))
}
