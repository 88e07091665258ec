//! Four-factor vote turning the latest snapshot into a recommendation.
//!
//! | Factor    | BUY point                 | SELL point               |
//! |-----------|---------------------------|--------------------------|
//! | RSI       | RSI < 30                  | RSI > 70                 |
//! | MACD      | MACD > signal             | MACD <= signal           |
//! | Trend     | close above both MAs      | otherwise                |
//! | Bollinger | close <= lower band       | close >= upper band      |
//!
//! MACD and Trend always vote; RSI and Bollinger may abstain.

use crate::error::{AppError, Result};
use crate::types::{Factor, FactorVote, IndicatorSnapshot, Side, Signal, VoteTally};

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

/// Resolved values of a complete snapshot.
struct Resolved {
    ma_fast: f64,
    ma_slow: f64,
    rsi: f64,
    macd: f64,
    macd_signal: f64,
    bb_upper: f64,
    bb_lower: f64,
}

fn resolve(snapshot: &IndicatorSnapshot) -> Result<Resolved> {
    match *snapshot {
        IndicatorSnapshot {
            ma_fast: Some(ma_fast),
            ma_slow: Some(ma_slow),
            rsi: Some(rsi),
            macd: Some(macd),
            macd_signal: Some(macd_signal),
            bb_upper: Some(bb_upper),
            bb_middle: Some(_),
            bb_lower: Some(bb_lower),
        } => Ok(Resolved {
            ma_fast,
            ma_slow,
            rsi,
            macd,
            macd_signal,
            bb_upper,
            bb_lower,
        }),
        _ => Err(AppError::InsufficientHistory(format!(
            "{} is undefined on the latest bar",
            snapshot.first_missing().unwrap_or("indicator")
        ))),
    }
}

/// Per-factor votes for `close` against `snapshot`.
pub fn tally(snapshot: &IndicatorSnapshot, close: f64) -> Result<VoteTally> {
    let v = resolve(snapshot)?;

    let rsi = if v.rsi < RSI_OVERSOLD {
        Some(Side::Buy)
    } else if v.rsi > RSI_OVERBOUGHT {
        Some(Side::Sell)
    } else {
        None
    };

    let macd = if v.macd > v.macd_signal {
        Side::Buy
    } else {
        Side::Sell
    };

    let trend = if close > v.ma_fast && close > v.ma_slow {
        Side::Buy
    } else {
        Side::Sell
    };

    let bollinger = if close <= v.bb_lower {
        Some(Side::Buy)
    } else if close >= v.bb_upper {
        Some(Side::Sell)
    } else {
        None
    };

    Ok(VoteTally::from_votes(vec![
        FactorVote {
            factor: Factor::Rsi,
            side: rsi,
        },
        FactorVote {
            factor: Factor::Macd,
            side: Some(macd),
        },
        FactorVote {
            factor: Factor::Trend,
            side: Some(trend),
        },
        FactorVote {
            factor: Factor::Bollinger,
            side: bollinger,
        },
    ]))
}

/// Recommendation for `close` against `snapshot`.
pub fn score(snapshot: &IndicatorSnapshot, close: f64) -> Result<Signal> {
    Ok(tally(snapshot, close)?.signal())
}
