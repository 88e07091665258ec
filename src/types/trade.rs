use serde::{Deserialize, Serialize};

/// One closed trade from the trader's log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(rename = "buy")]
    pub buy_price: f64,
    #[serde(rename = "sell")]
    pub sell_price: f64,
    /// Signed profit of the trade.
    pub profit: f64,
    /// Whether the trade is labelled profitable.
    pub result: bool,
}

impl TradeRecord {
    /// Derive profit and outcome from the entry and exit prices.
    pub fn from_prices(buy_price: f64, sell_price: f64) -> Self {
        let profit = sell_price - buy_price;
        Self {
            buy_price,
            sell_price,
            profit,
            result: profit > 0.0,
        }
    }

    /// Feature vector used by the profit predictor.
    pub fn features(&self) -> [f64; 3] {
        [self.buy_price, self.sell_price, self.profit]
    }
}

/// A trade as persisted in the trade log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTrade {
    pub id: i64,
    #[serde(rename = "stock")]
    pub symbol: String,
    #[serde(flatten)]
    pub record: TradeRecord,
    /// Unix timestamp (milliseconds) when recorded.
    pub created_at: i64,
}

/// Why no probability could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientReason {
    /// Fewer trades than the minimum.
    TooFewRecords,
    /// Every trade carries the same outcome label.
    SingleClass,
    /// The classifier did not converge to a usable fit.
    FitFailed,
}

/// Outcome of a profit prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionResult {
    /// Probability of profit, in percent, rounded to two decimals.
    Probability { percent: f64 },
    InsufficientData { reason: InsufficientReason },
}

impl PredictionResult {
    pub fn percent(&self) -> Option<f64> {
        match self {
            PredictionResult::Probability { percent } => Some(*percent),
            PredictionResult::InsufficientData { .. } => None,
        }
    }

    /// User-facing message for `symbol`.
    pub fn message(&self, symbol: &str) -> String {
        match self {
            PredictionResult::Probability { percent } => {
                format!("Profit Probability for {}: {:.2}%", symbol, percent)
            }
            PredictionResult::InsufficientData { .. } => {
                "Not enough data for prediction.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_prices() {
        let win = TradeRecord::from_prices(100.0, 112.5);
        assert_eq!(win.profit, 12.5);
        assert!(win.result);

        let flat = TradeRecord::from_prices(100.0, 100.0);
        assert!(!flat.result);

        let loss = TradeRecord::from_prices(100.0, 90.0);
        assert_eq!(loss.profit, -10.0);
        assert!(!loss.result);
    }

    #[test]
    fn test_record_serde_names() {
        let json = serde_json::to_value(TradeRecord::from_prices(10.0, 12.0)).unwrap();
        assert_eq!(json["buy"], 10.0);
        assert_eq!(json["sell"], 12.0);
        assert_eq!(json["profit"], 2.0);
        assert_eq!(json["result"], true);
    }

    #[test]
    fn test_prediction_messages() {
        let result = PredictionResult::Probability { percent: 62.5 };
        assert_eq!(
            result.message("RELIANCE"),
            "Profit Probability for RELIANCE: 62.50%"
        );

        let result = PredictionResult::InsufficientData {
            reason: InsufficientReason::TooFewRecords,
        };
        assert_eq!(result.message("RELIANCE"), "Not enough data for prediction.");
        assert_eq!(result.percent(), None);
    }
}
