//! Exponential Moving Average (EMA) indicator.

use super::Indicator;

/// EMA (Exponential Moving Average) indicator.
///
/// Recursive smoothing with `alpha = 2 / (span + 1)`, seeded with the first
/// observation and no bias correction, so every bar has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ema {
    span: usize,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self { span }
    }

    fn alpha(&self) -> f64 {
        2.0 / (self.span as f64 + 1.0)
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn name(&self) -> String {
        format!("EMA ({})", self.span)
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, values: &[f64]) -> Vec<f64> {
        let alpha = self.alpha();
        let mut out = Vec::with_capacity(values.len());

        let Some(&first) = values.first() else {
            return out;
        };

        let mut ema = first;
        out.push(ema);
        for &value in &values[1..] {
            ema = (value - ema) * alpha + ema;
            out.push(ema);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::test_support::assert_close;

    #[test]
    fn test_ema_seeded_with_first_value() {
        let values = Ema::new(12).calculate(&[10.0, 20.0]);
        assert_eq!(values[0], 10.0);
        // alpha = 2/13
        assert_close(values[1], 10.0 + 10.0 * 2.0 / 13.0);
    }

    #[test]
    fn test_ema_recurrence() {
        let closes = [5.0, 7.0, 6.0, 9.0, 4.0];
        let values = Ema::new(3).calculate(&closes);

        let mut expected = closes[0];
        for (i, &c) in closes.iter().enumerate().skip(1) {
            expected = 0.5 * c + 0.5 * expected;
            assert_close(values[i], expected);
        }
    }

    #[test]
    fn test_ema_constant_series() {
        let values = Ema::new(26).calculate(&[42.0; 40]);
        assert!(values.iter().all(|v| *v == 42.0));
    }

    #[test]
    fn test_ema_empty() {
        assert!(Ema::new(9).calculate(&[]).is_empty());
    }
}
