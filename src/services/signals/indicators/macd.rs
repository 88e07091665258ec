//! MACD (Moving Average Convergence Divergence) indicator.

use serde::{Deserialize, Serialize};

use super::{Ema, Indicator};

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// Buy signal: MACD above signal line
/// Sell signal: MACD at or below signal line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }
}

/// MACD values for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
}

impl Indicator for Macd {
    type Output = MacdPoint;

    fn name(&self) -> String {
        format!(
            "MACD ({}, {}, {})",
            self.fast_period, self.slow_period, self.signal_period
        )
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, closes: &[f64]) -> Vec<MacdPoint> {
        let fast = Ema::new(self.fast_period).calculate(closes);
        let slow = Ema::new(self.slow_period).calculate(closes);

        let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_line = Ema::new(self.signal_period).calculate(&macd_line);

        macd_line
            .into_iter()
            .zip(signal_line)
            .map(|(macd, signal)| MacdPoint { macd, signal })
            .collect()
    }
}
