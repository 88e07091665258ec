//! Relative Strength Index (RSI) indicator.

use super::Indicator;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Gains and losses are averaged with a simple trailing mean over `period`
/// bar-to-bar deltas. Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// A window without losses saturates at 100, and a window without any
/// movement reads 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// RSI from average gain and average loss.
    pub fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return if avg_gain == 0.0 { 50.0 } else { 100.0 };
        }

        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}

/// Running sum over the deltas currently in the window.
///
/// `count` tracks non-zero members so an emptied side reads exactly zero
/// instead of subtraction residue.
#[derive(Default)]
struct WindowSum {
    sum: f64,
    count: usize,
}

impl WindowSum {
    fn add(&mut self, value: f64) {
        if value > 0.0 {
            self.sum += value;
            self.count += 1;
        }
    }

    fn remove(&mut self, value: f64) {
        if value > 0.0 {
            self.sum -= value;
            self.count -= 1;
        }
    }

    fn mean(&self, period: usize) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum.max(0.0) / period as f64
        }
    }
}

impl Indicator for Rsi {
    type Output = Option<f64>;

    fn name(&self) -> String {
        format!("RSI ({})", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut out = Vec::with_capacity(closes.len());
        if closes.is_empty() {
            return out;
        }

        // The first bar has no delta.
        out.push(None);

        let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let mut gains = WindowSum::default();
        let mut losses = WindowSum::default();

        for (i, &delta) in deltas.iter().enumerate() {
            gains.add(delta);
            losses.add(-delta);

            if i >= self.period {
                let old = deltas[i - self.period];
                gains.remove(old);
                losses.remove(-old);
            }

            if i + 1 >= self.period {
                let rsi = Self::from_averages(gains.mean(self.period), losses.mean(self.period));
                out.push(Some(rsi));
            } else {
                out.push(None);
            }
        }

        out
    }
}
