//! Profit probability from a trader's own trade log.

pub mod logistic;

pub use logistic::{LogisticError, LogisticRegression};

use ndarray::{Array1, Array2};
use tracing::{debug, warn};

use crate::types::{InsufficientReason, PredictionResult, TradeRecord};

/// Default minimum number of trades before a fit is attempted.
pub const MIN_TRADE_RECORDS: usize = 5;

/// Estimates the probability that the most recent trade pattern is profitable.
///
/// The classifier is fitted on every record, including the one being scored,
/// and refitted on each call. The result is an in-sample estimate of how well
/// the latest trade fits the history, not an out-of-sample forecast.
#[derive(Debug, Clone, Copy)]
pub struct ProfitPredictor {
    min_records: usize,
}

impl Default for ProfitPredictor {
    fn default() -> Self {
        Self {
            min_records: MIN_TRADE_RECORDS,
        }
    }
}

impl ProfitPredictor {
    pub fn new(min_records: usize) -> Self {
        Self { min_records }
    }

    pub fn min_records(&self) -> usize {
        self.min_records
    }

    /// Fit on `records` (oldest first) and score the last one.
    pub fn fit_and_predict(&self, records: &[TradeRecord]) -> PredictionResult {
        if records.len() < self.min_records || records.is_empty() {
            debug!(
                "Skipping prediction: {} trades, {} required",
                records.len(),
                self.min_records
            );
            return PredictionResult::InsufficientData {
                reason: InsufficientReason::TooFewRecords,
            };
        }

        let x = Array2::from_shape_fn((records.len(), 3), |(i, j)| records[i].features()[j]);
        let y: Array1<f64> = records
            .iter()
            .map(|r| if r.result { 1.0 } else { 0.0 })
            .collect();

        let mut model = LogisticRegression::default();
        if let Err(e) = model.fit(&x, &y) {
            let reason = match e {
                LogisticError::SingleClass => InsufficientReason::SingleClass,
                _ => {
                    warn!("Profit model fit failed on {} trades: {}", records.len(), e);
                    InsufficientReason::FitFailed
                }
            };
            return PredictionResult::InsufficientData { reason };
        }

        let latest = x.slice(ndarray::s![records.len() - 1.., ..]).to_owned();
        let probability = match model.predict_proba(&latest) {
            Ok(p) => p[0],
            Err(e) => {
                warn!("Profit model scoring failed: {}", e);
                return PredictionResult::InsufficientData {
                    reason: InsufficientReason::FitFailed,
                };
            }
        };

        debug!(
            "Profit model fitted in {} iterations on {} trades, p = {:.4}",
            model.iterations(),
            records.len(),
            probability
        );

        PredictionResult::Probability {
            percent: (probability * 100.0 * 100.0).round() / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trades(pairs: &[(f64, f64)]) -> Vec<TradeRecord> {
        pairs
            .iter()
            .map(|&(buy, sell)| TradeRecord::from_prices(buy, sell))
            .collect()
    }

    #[test]
    fn test_four_records_insufficient() {
        let records = trades(&[(100.0, 110.0), (100.0, 90.0), (100.0, 120.0), (100.0, 80.0)]);
        let result = ProfitPredictor::default().fit_and_predict(&records);
        assert_eq!(
            result,
            PredictionResult::InsufficientData {
                reason: InsufficientReason::TooFewRecords
            }
        );
        assert_eq!(result.message("RELIANCE"), "Not enough data for prediction.");
    }

    #[test]
    fn test_empty_insufficient() {
        let result = ProfitPredictor::new(0).fit_and_predict(&[]);
        assert_eq!(result.percent(), None);
    }

    #[test]
    fn test_single_class_insufficient() {
        let records = trades(&[
            (100.0, 110.0),
            (101.0, 115.0),
            (99.0, 104.0),
            (120.0, 121.0),
            (95.0, 130.0),
        ]);
        let result = ProfitPredictor::default().fit_and_predict(&records);
        assert_eq!(
            result,
            PredictionResult::InsufficientData {
                reason: InsufficientReason::SingleClass
            }
        );
    }

    #[test]
    fn test_indistinguishable_trades_are_even() {
        let mut records = Vec::new();
        for i in 0..6 {
            records.push(TradeRecord {
                buy_price: 100.0,
                sell_price: 110.0,
                profit: 10.0,
                result: i % 2 == 0,
            });
        }
        let result = ProfitPredictor::default().fit_and_predict(&records);
        assert_eq!(result, PredictionResult::Probability { percent: 50.0 });
        assert_eq!(result.message("TCS"), "Profit Probability for TCS: 50.00%");
    }

    #[test]
    fn test_winning_pattern_scores_high() {
        let records = trades(&[
            (100.0, 110.0),
            (105.0, 98.0),
            (98.0, 108.0),
            (110.0, 103.0),
            (102.0, 115.0),
            (120.0, 112.0),
            (101.0, 118.0),
        ]);
        let percent = ProfitPredictor::default()
            .fit_and_predict(&records)
            .percent()
            .unwrap();
        assert!(percent > 50.0 && percent <= 100.0, "got {}", percent);
    }

    #[test]
    fn test_losing_pattern_scores_low() {
        let records = trades(&[
            (100.0, 110.0),
            (105.0, 98.0),
            (98.0, 108.0),
            (110.0, 103.0),
            (102.0, 115.0),
            (101.0, 118.0),
            (120.0, 100.0),
        ]);
        let percent = ProfitPredictor::default()
            .fit_and_predict(&records)
            .percent()
            .unwrap();
        assert!(percent < 50.0 && percent >= 0.0, "got {}", percent);
    }

    #[test]
    fn test_percent_has_two_decimals() {
        let records = trades(&[
            (100.0, 104.0),
            (100.0, 97.0),
            (100.0, 101.0),
            (100.0, 99.5),
            (100.0, 103.0),
            (100.0, 98.0),
        ]);
        let percent = ProfitPredictor::default()
            .fit_and_predict(&records)
            .percent()
            .unwrap();
        let scaled = percent * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}
