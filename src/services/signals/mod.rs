//! Trading signals service module.
//!
//! Provides technical indicator calculations over a price series and the
//! vote that turns the latest bar into a BUY/SELL/HOLD recommendation.

pub mod engine;
pub mod indicators;
pub mod scorer;

pub use engine::IndicatorEngine;
pub use scorer::{score, tally};

use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::types::{IndicatorSnapshot, PriceSeries, Signal, VoteTally};

/// Recommendation for the latest bar of a series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub latest_time: i64,
    pub latest_close: f64,
    pub snapshot: IndicatorSnapshot,
    pub tally: VoteTally,
    pub signal: Signal,
    pub bars_analyzed: usize,
}

/// Compute indicators over `series` and score its latest bar.
pub fn analyze(series: &PriceSeries, engine: &IndicatorEngine) -> Result<MarketAnalysis> {
    let snapshots = engine.compute(series);
    let latest = series.latest();
    let snapshot = *snapshots
        .last()
        .ok_or_else(|| AppError::InsufficientHistory("series has no bars".to_string()))?;

    let tally = tally(&snapshot, latest.close)?;
    let signal = tally.signal();
    debug!(
        "Scored bar {} at {:.2}: {} (buy {} / sell {})",
        latest.time, latest.close, signal, tally.buy_points, tally.sell_points
    );

    Ok(MarketAnalysis {
        latest_time: latest.time,
        latest_close: latest.close,
        snapshot,
        tally,
        signal,
        bars_analyzed: series.len(),
    })
}
