//! Augur - technical indicator signals and trade-log profit prediction

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use services::{IndicatorEngine, ProfitPredictor, TradeStore};

pub use types::*;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: IndicatorEngine,
    pub predictor: ProfitPredictor,
    pub trade_store: Arc<TradeStore>,
}

impl AppState {
    /// Build state from configuration, validating the indicator windows.
    pub fn new(config: Config, trade_store: TradeStore) -> error::Result<Self> {
        let engine = IndicatorEngine::new(&config.indicators)?;
        let predictor = ProfitPredictor::new(config.min_trade_records);
        Ok(Self {
            config: Arc::new(config),
            engine,
            predictor,
            trade_store: Arc::new(trade_store),
        })
    }
}

/// Build the HTTP application.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
