//! Liveness endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    /// `ok`, or `degraded` when the trade log cannot be read.
    status: &'static str,
    version: &'static str,
    /// Bars an analysis request needs with the configured windows.
    min_history: usize,
    /// Trades a symbol needs before a profit prediction is attempted.
    min_trade_records: usize,
    trade_store: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let trade_store = match state.trade_store.list(1) {
        Ok(_) => true,
        Err(e) => {
            warn!("Health check could not read trade log: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if trade_store { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        min_history: state.engine.min_history(),
        min_trade_records: state.predictor.min_records(),
        trade_store,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::TradeStore;

    #[tokio::test]
    async fn test_health_reports_store_and_history() {
        let store = TradeStore::new_in_memory().unwrap();
        let state = AppState::new(Config::default(), store).unwrap();

        let Json(response) = health(State(state)).await;
        assert_eq!(response.status, "ok");
        assert!(response.trade_store);
        assert_eq!(response.min_history, 50);
        assert_eq!(response.min_trade_records, Config::default().min_trade_records);
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["minHistory"], 50);
        assert_eq!(json["tradeStore"], true);
        assert!(json["minTradeRecords"].is_u64());
    }
}
