//! Trade log endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::symbols;
use crate::types::{StoredTrade, TradeRecord};
use crate::AppState;

const DEFAULT_HISTORY_LIMIT: usize = 100;
const MAX_HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Body for `POST /api/trades`. Profit and outcome are derived from the
/// prices when omitted.
#[derive(Debug, Deserialize)]
pub struct NewTrade {
    pub stock: String,
    pub buy: f64,
    pub sell: f64,
    pub profit: Option<f64>,
    pub result: Option<bool>,
}

impl NewTrade {
    fn into_record(self) -> Result<(String, TradeRecord)> {
        let symbol = symbols::normalize(&self.stock)
            .ok_or_else(|| AppError::BadRequest("stock must not be empty".to_string()))?;

        for (name, price) in [("buy", self.buy), ("sell", self.sell)] {
            if !price.is_finite() || price < 0.0 {
                return Err(AppError::BadRequest(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }

        let mut record = TradeRecord::from_prices(self.buy, self.sell);
        if let Some(profit) = self.profit {
            if !profit.is_finite() {
                return Err(AppError::BadRequest("profit must be a number".to_string()));
            }
            record.profit = profit;
            record.result = profit > 0.0;
        }
        if let Some(result) = self.result {
            record.result = result;
        }

        Ok((symbol, record))
    }
}

/// Create the trades router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_trades).post(create_trade))
}

/// GET /api/trades
async fn list_trades(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<StoredTrade>>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let trades = state.trade_store.list(limit)?;
    Ok(Json(ApiResponse::new(trades)))
}

/// POST /api/trades
async fn create_trade(
    State(state): State<AppState>,
    Json(trade): Json<NewTrade>,
) -> Result<(StatusCode, Json<ApiResponse<StoredTrade>>)> {
    let (symbol, record) = trade.into_record()?;
    let stored = state.trade_store.insert(&symbol, &record)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(stored))))
}
