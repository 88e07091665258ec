use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Milliseconds in one day.
const DAY_MS: i64 = 86_400_000;

/// A single OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar open time, unix milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    fn check(&self) -> Result<(), String> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{} is not a finite number at time {}", name, self.time));
            }
            if value < 0.0 {
                return Err(format!("{} is negative at time {}", name, self.time));
            }
        }
        Ok(())
    }
}

/// Historical window to analyze, counted back from the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LookbackPeriod {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "max")]
    Max,
}

impl LookbackPeriod {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Some(Self::OneMonth),
            "3mo" => Some(Self::ThreeMonths),
            "6mo" => Some(Self::SixMonths),
            "1y" => Some(Self::OneYear),
            "2y" => Some(Self::TwoYears),
            "5y" => Some(Self::FiveYears),
            "max" => Some(Self::Max),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::Max => "max",
        }
    }

    /// Window length in days, `None` for the whole history.
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::OneMonth => Some(30),
            Self::ThreeMonths => Some(91),
            Self::SixMonths => Some(182),
            Self::OneYear => Some(365),
            Self::TwoYears => Some(730),
            Self::FiveYears => Some(1826),
            Self::Max => None,
        }
    }
}

/// Chronologically ordered, validated bars.
///
/// Every bar has finite non-negative fields and timestamps are strictly
/// increasing, so rolling computations never see duplicates or gaps in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, AppError> {
        if bars.is_empty() {
            return Err(AppError::InvalidSeries("series has no bars".to_string()));
        }
        for bar in &bars {
            bar.check().map_err(AppError::InvalidSeries)?;
        }
        if let Some(pair) = bars.windows(2).find(|w| w[1].time <= w[0].time) {
            return Err(AppError::InvalidSeries(format!(
                "timestamps must be strictly increasing ({} followed by {})",
                pair[0].time, pair[1].time
            )));
        }
        Ok(Self { bars })
    }

    /// Build a series from closes alone, one bar per day starting at `start`.
    /// Open/high/low equal the close and volume is zero.
    pub fn from_closes(start: i64, closes: &[f64]) -> Result<Self, AppError> {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                time: start + i as i64 * DAY_MS,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect();
        Self::new(bars)
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> &PriceBar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }

    /// Trailing bars that fall inside `period` of the latest bar.
    pub fn window(&self, period: LookbackPeriod) -> PriceSeries {
        let Some(days) = period.days() else {
            return self.clone();
        };
        let cutoff = self.latest().time - days * DAY_MS;
        let start = self.bars.partition_point(|b| b.time < cutoff);
        Self {
            bars: self.bars[start..].to_vec(),
        }
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = AppError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<PriceBar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(time: i64, close: f64) -> PriceBar {
        PriceBar {
            time,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn test_series_accepts_ordered_bars() {
        let series = PriceSeries::new(vec![bar(1, 10.0), bar(2, 11.0), bar(3, 12.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.latest().time, 3);
    }

    #[test]
    fn test_series_rejects_empty() {
        assert!(matches!(
            PriceSeries::new(vec![]),
            Err(AppError::InvalidSeries(_))
        ));
    }

    #[test]
    fn test_series_rejects_duplicate_timestamps() {
        let result = PriceSeries::new(vec![bar(1, 10.0), bar(1, 11.0)]);
        assert!(matches!(result, Err(AppError::InvalidSeries(_))));
    }

    #[test]
    fn test_series_rejects_unordered_timestamps() {
        let result = PriceSeries::new(vec![bar(2, 10.0), bar(1, 11.0)]);
        assert!(matches!(result, Err(AppError::InvalidSeries(_))));
    }

    #[test]
    fn test_series_rejects_negative_values() {
        let mut negative = bar(1, 10.0);
        negative.volume = -5.0;
        let result = PriceSeries::new(vec![negative]);
        assert!(matches!(result, Err(AppError::InvalidSeries(_))));
    }

    #[test]
    fn test_series_rejects_nan() {
        let result = PriceSeries::new(vec![bar(1, f64::NAN)]);
        assert!(matches!(result, Err(AppError::InvalidSeries(_))));
    }

    #[test]
    fn test_series_deserialize_validates() {
        let json = r#"[
            {"time": 2, "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0, "volume": 0.0},
            {"time": 1, "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0, "volume": 0.0}
        ]"#;
        assert!(serde_json::from_str::<PriceSeries>(json).is_err());
    }

    #[test]
    fn test_window_trims_to_period() {
        let closes: Vec<f64> = (0..400).map(|i| 100.0 + i as f64).collect();
        let series = PriceSeries::from_closes(0, &closes).unwrap();

        let month = series.window(LookbackPeriod::OneMonth);
        assert_eq!(month.len(), 31);
        assert_eq!(month.latest(), series.latest());

        let all = series.window(LookbackPeriod::Max);
        assert_eq!(all.len(), 400);

        let five_years = series.window(LookbackPeriod::FiveYears);
        assert_eq!(five_years.len(), 400);
    }

    #[test]
    fn test_lookback_period_round_trip() {
        for s in ["1mo", "3mo", "6mo", "1y", "2y", "5y", "max"] {
            let period = LookbackPeriod::from_str(s).unwrap();
            assert_eq!(period.as_str(), s);
        }
        assert_eq!(LookbackPeriod::from_str("6MO"), Some(LookbackPeriod::SixMonths));
        assert_eq!(LookbackPeriod::from_str("10d"), None);
        assert_eq!(LookbackPeriod::default(), LookbackPeriod::SixMonths);
    }
}
