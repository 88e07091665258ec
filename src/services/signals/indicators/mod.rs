//! Technical indicator implementations.
//!
//! Each indicator maps a slice of closes to one output per input, aligned by
//! index. Outputs depend only on the current and earlier closes.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{Bands, BollingerBands};
pub use ema::Ema;
pub use macd::{Macd, MacdPoint};
pub use rsi::Rsi;
pub use sma::Sma;

/// Trait for implementing technical indicators.
pub trait Indicator {
    /// Per-bar output.
    type Output;

    /// Human-readable name.
    fn name(&self) -> String;

    /// Bars required before the output resolves.
    fn min_periods(&self) -> usize;

    /// Calculate one output per close.
    fn calculate(&self, closes: &[f64]) -> Vec<Self::Output>;
}

/// Length of the current run of identical closes.
///
/// Rolling sums drift once values leave the window; a window made of one
/// repeated close has to report that close and zero spread exactly.
#[derive(Debug, Default)]
pub(crate) struct FlatRun {
    last: Option<f64>,
    len: usize,
}

impl FlatRun {
    /// Record `close` and return the run length including it.
    pub(crate) fn push(&mut self, close: f64) -> usize {
        if self.last == Some(close) {
            self.len += 1;
        } else {
            self.last = Some(close);
            self.len = 1;
        }
        self.len
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Closes rising by one per bar from 100.
    pub fn rising(count: usize) -> Vec<f64> {
        (0..count).map(|i| 100.0 + i as f64).collect()
    }

    /// Closes oscillating around 100.
    pub fn choppy(count: usize) -> Vec<f64> {
        (0..count)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + (i % 3) as f64)
            .collect()
    }

    pub fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }
}
