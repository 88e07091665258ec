use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived indicator values for one bar.
///
/// A field is `None` until its lookback window has filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub ma_fast: Option<f64>,
    pub ma_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
}

impl IndicatorSnapshot {
    /// Name of the first undefined field, if any.
    pub fn first_missing(&self) -> Option<&'static str> {
        [
            ("ma_fast", self.ma_fast),
            ("ma_slow", self.ma_slow),
            ("rsi", self.rsi),
            ("macd", self.macd),
            ("macd_signal", self.macd_signal),
            ("bb_upper", self.bb_upper),
            ("bb_middle", self.bb_middle),
            ("bb_lower", self.bb_lower),
        ]
        .into_iter()
        .find(|(_, v)| v.is_none())
        .map(|(name, _)| name)
    }

    /// Whether every field has resolved.
    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }
}

/// Discrete trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side a factor voted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Buy,
    Sell,
}

/// Inputs to the recommendation vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Oversold/overbought; may abstain.
    Rsi,
    /// MACD against its signal line; always votes.
    Macd,
    /// Close against both moving averages; always votes.
    Trend,
    /// Close against the bands; may abstain.
    Bollinger,
}

/// One factor's contribution to the vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorVote {
    pub factor: Factor,
    pub side: Option<Side>,
}

/// Points awarded to each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub buy_points: u8,
    pub sell_points: u8,
    pub votes: Vec<FactorVote>,
}

impl VoteTally {
    pub fn from_votes(votes: Vec<FactorVote>) -> Self {
        let count = |side| votes.iter().filter(|v| v.side == Some(side)).count() as u8;
        Self {
            buy_points: count(Side::Buy),
            sell_points: count(Side::Sell),
            votes,
        }
    }

    /// Strict majority wins; equal totals hold.
    pub fn signal(&self) -> Signal {
        use std::cmp::Ordering;
        match self.buy_points.cmp(&self.sell_points) {
            Ordering::Greater => Signal::Buy,
            Ordering::Less => Signal::Sell,
            Ordering::Equal => Signal::Hold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(factor: Factor, side: Option<Side>) -> FactorVote {
        FactorVote { factor, side }
    }

    #[test]
    fn test_signal_literals() {
        assert_eq!(Signal::Buy.to_string(), "BUY");
        assert_eq!(Signal::Sell.to_string(), "SELL");
        assert_eq!(Signal::Hold.to_string(), "HOLD");
        assert_eq!(serde_json::to_string(&Signal::Hold).unwrap(), "\"HOLD\"");
        let parsed: Signal = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(parsed, Signal::Sell);
    }

    #[test]
    fn test_snapshot_missing_field() {
        let mut snapshot = IndicatorSnapshot {
            ma_fast: Some(1.0),
            ma_slow: Some(1.0),
            rsi: Some(50.0),
            macd: Some(0.0),
            macd_signal: Some(0.0),
            bb_upper: Some(2.0),
            bb_middle: Some(1.0),
            bb_lower: Some(0.0),
        };
        assert!(snapshot.is_complete());

        snapshot.ma_slow = None;
        assert_eq!(snapshot.first_missing(), Some("ma_slow"));
        assert!(!snapshot.is_complete());
        assert_eq!(IndicatorSnapshot::default().first_missing(), Some("ma_fast"));
    }

    #[test]
    fn test_snapshot_serializes_null() {
        let json = serde_json::to_value(IndicatorSnapshot::default()).unwrap();
        assert!(json["maSlow"].is_null());
        assert!(json["bbLower"].is_null());
    }

    #[test]
    fn test_tally_counts_abstentions() {
        let tally = VoteTally::from_votes(vec![
            vote(Factor::Rsi, None),
            vote(Factor::Macd, Some(Side::Buy)),
            vote(Factor::Trend, Some(Side::Sell)),
            vote(Factor::Bollinger, None),
        ]);
        assert_eq!(tally.buy_points, 1);
        assert_eq!(tally.sell_points, 1);
        assert_eq!(tally.signal(), Signal::Hold);
    }
}
