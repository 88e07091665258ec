//! Bollinger Bands indicator.

use serde::{Deserialize, Serialize};

use super::{FlatRun, Indicator};

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// StdDev is the sample standard deviation (n - 1 denominator) of the same
/// window, tracked with a sliding Welford update. A window of identical
/// closes resets the running state, so it reports exactly zero deviation.
///
/// Signals:
/// - Price at or below lower band = oversold (bullish)
/// - Price at or above upper band = overbought (bearish)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

/// Band values for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub std_dev: f64,
}

impl Indicator for BollingerBands {
    type Output = Option<Bands>;

    fn name(&self) -> String {
        format!("Bollinger Bands ({}, {})", self.period, self.std_dev_multiplier)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, closes: &[f64]) -> Vec<Option<Bands>> {
        let n = self.period as f64;
        let mut out = Vec::with_capacity(closes.len());
        let mut mean = 0.0;
        // Sum of squared deviations from the window mean.
        let mut m2 = 0.0;
        let mut flat = FlatRun::default();

        for (i, &close) in closes.iter().enumerate() {
            if flat.push(close) >= self.period {
                mean = close;
                m2 = 0.0;
            } else if i < self.period {
                let count = (i + 1) as f64;
                let delta = close - mean;
                mean += delta / count;
                m2 += delta * (close - mean);
            } else {
                let dropped = closes[i - self.period];
                let old_mean = mean;
                mean += (close - dropped) / n;
                m2 += (close - dropped) * (close - mean + dropped - old_mean);
            }

            if i + 1 < self.period {
                out.push(None);
                continue;
            }

            let std_dev = (m2.max(0.0) / (n - 1.0)).sqrt();
            let width = self.std_dev_multiplier * std_dev;
            out.push(Some(Bands {
                upper: mean + width,
                middle: mean,
                lower: mean - width,
                std_dev,
            }));
        }

        out
    }
}
