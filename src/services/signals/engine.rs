//! Per-bar indicator snapshots over a price series.

use tracing::debug;

use super::indicators::{BollingerBands, Indicator, Macd, Rsi, Sma};
use crate::config::IndicatorConfig;
use crate::error::Result;
use crate::types::{IndicatorSnapshot, PriceSeries};

/// Computes moving averages, RSI, MACD and Bollinger Bands for every bar.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine {
    ma_fast: Sma,
    ma_slow: Sma,
    rsi: Rsi,
    macd: Macd,
    bollinger: BollingerBands,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::from_validated(&IndicatorConfig::default())
    }
}

impl IndicatorEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: &IndicatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: &IndicatorConfig) -> Self {
        Self {
            ma_fast: Sma::new(config.ma_fast),
            ma_slow: Sma::new(config.ma_slow),
            rsi: Rsi::new(config.rsi_period),
            macd: Macd::new(config.macd_fast, config.macd_slow, config.macd_signal),
            bollinger: BollingerBands::new(config.bb_period, config.bb_std_dev),
        }
    }

    /// Bars needed before every snapshot field resolves.
    pub fn min_history(&self) -> usize {
        [
            self.ma_fast.min_periods(),
            self.ma_slow.min_periods(),
            self.rsi.min_periods(),
            self.macd.min_periods(),
            self.bollinger.min_periods(),
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }

    /// Display names of the configured indicators.
    pub fn names(&self) -> Vec<String> {
        vec![
            self.ma_fast.name(),
            self.ma_slow.name(),
            self.rsi.name(),
            self.macd.name(),
            self.bollinger.name(),
        ]
    }

    /// One snapshot per bar, aligned by index. The series is only read.
    pub fn compute(&self, series: &PriceSeries) -> Vec<IndicatorSnapshot> {
        let closes = series.closes();

        let ma_fast = self.ma_fast.calculate(&closes);
        let ma_slow = self.ma_slow.calculate(&closes);
        let rsi = self.rsi.calculate(&closes);
        let macd = self.macd.calculate(&closes);
        let bands = self.bollinger.calculate(&closes);

        debug!(
            "Computed {} over {} bars ({} needed for a full snapshot)",
            self.names().join(", "),
            closes.len(),
            self.min_history()
        );

        (0..closes.len())
            .map(|i| IndicatorSnapshot {
                ma_fast: ma_fast[i],
                ma_slow: ma_slow[i],
                rsi: rsi[i],
                macd: Some(macd[i].macd),
                macd_signal: Some(macd[i].signal),
                bb_upper: bands[i].map(|b| b.upper),
                bb_middle: bands[i].map(|b| b.middle),
                bb_lower: bands[i].map(|b| b.lower),
            })
            .collect()
    }
}
