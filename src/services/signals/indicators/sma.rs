//! Simple Moving Average (SMA) indicator.

use super::{FlatRun, Indicator};

/// SMA (Simple Moving Average) indicator.
///
/// Arithmetic mean of the trailing `period` closes, maintained as a running
/// window sum. A window of identical closes yields that close exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = Option<f64>;

    fn name(&self) -> String {
        format!("SMA ({})", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut out = Vec::with_capacity(closes.len());
        let mut sum = 0.0;
        let mut flat = FlatRun::default();

        for (i, &close) in closes.iter().enumerate() {
            sum += close;
            if i >= self.period {
                sum -= closes[i - self.period];
            }

            if flat.push(close) >= self.period {
                sum = close * self.period as f64;
                out.push(Some(close));
            } else if i + 1 >= self.period {
                out.push(Some(sum / self.period as f64));
            } else {
                out.push(None);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::test_support::{assert_close, choppy};

    #[test]
    fn test_sma_name() {
        assert_eq!(Sma::new(20).name(), "SMA (20)");
        assert_eq!(Sma::new(50).min_periods(), 50);
    }

    #[test]
    fn test_sma_undefined_before_window() {
        let values = Sma::new(20).calculate(&choppy(30));
        assert!(values[..19].iter().all(Option::is_none));
        assert!(values[19..].iter().all(Option::is_some));
    }

    #[test]
    fn test_sma_matches_direct_mean() {
        let closes = choppy(80);
        let values = Sma::new(20).calculate(&closes);

        for i in [19, 37, 79] {
            let direct = closes[i + 1 - 20..=i].iter().sum::<f64>() / 20.0;
            assert_close(values[i].unwrap(), direct);
        }
    }

    #[test]
    fn test_sma_flat_window_after_movement() {
        let mut closes = choppy(60);
        closes.extend([987.65; 20]);
        let values = Sma::new(20).calculate(&closes);
        assert_eq!(values[79], Some(987.65));

        closes.push(1000.0);
        let values = Sma::new(20).calculate(&closes);
        let direct = closes[61..=80].iter().sum::<f64>() / 20.0;
        assert_close(values[80].unwrap(), direct);
    }

    #[test]
    fn test_sma_short_input() {
        let values = Sma::new(5).calculate(&[1.0, 2.0]);
        assert_eq!(values, vec![None, None]);
        assert!(Sma::new(5).calculate(&[]).is_empty());
    }
}
