//! Relative Strength Index (RSI) indicator.

use super::wilder_series;
use crate::services::signals::Indicator;
use crate::types::PriceBar;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
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

    /// RSI over an arbitrary value column (closes, or another indicator).
    pub(crate) fn rsi_values(values: &[f64], period: usize) -> Vec<Option<f64>> {
        let mut gains = vec![None; values.len()];
        let mut losses = vec![None; values.len()];

        for i in 1..values.len() {
            let change = values[i] - values[i - 1];
            if change > 0.0 {
                gains[i] = Some(change);
                losses[i] = Some(0.0);
            } else {
                gains[i] = Some(0.0);
                losses[i] = Some(-change);
            }
        }

        // Use smoothed averages (Wilder)
        let avg_gains = wilder_series(&gains, period);
        let avg_losses = wilder_series(&losses, period);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(gain, loss)| {
                let (avg_gain, avg_loss) = ((*gain)?, (*loss)?);
                if avg_loss == 0.0 {
                    // No movement at all leaves RSI undefined
                    return (avg_gain > 0.0).then_some(100.0);
                }
                let rs = avg_gain / avg_loss;
                Some(100.0 - (100.0 / (1.0 + rs)))
            })
            .collect()
    }
}

impl Indicator for Rsi {
    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> &str {
        "RSI (14)"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        Self::rsi_values(&closes, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_util::{
        create_downtrend_bars, create_flat_bars, create_uptrend_bars, create_wavy_bars,
    };

    #[test]
    fn test_rsi_id_and_name() {
        let rsi = Rsi::default();
        assert_eq!(rsi.id(), "rsi");
        assert_eq!(rsi.name(), "RSI (14)");
    }

    #[test]
    fn test_rsi_min_periods() {
        let rsi = Rsi::default();
        assert_eq!(rsi.min_periods(), 15);
    }

    #[test]
    fn test_rsi_warmup_matches_min_periods() {
        let rsi = Rsi::default();
        let values = rsi.series(&create_wavy_bars(40));
        assert!(values[..14].iter().all(Option::is_none));
        assert!(values[14..].iter().all(Option::is_some));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::default();
        let values = rsi.series(&create_uptrend_bars(10));
        assert!(values.iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_uptrend_high_value() {
        let rsi = Rsi::default();
        let last = rsi.series(&create_uptrend_bars(50)).pop().flatten().unwrap();
        assert_eq!(last, 100.0, "RSI in a loss-free uptrend should be 100");
    }

    #[test]
    fn test_rsi_downtrend_low_value() {
        let rsi = Rsi::default();
        let last = rsi
            .series(&create_downtrend_bars(50))
            .pop()
            .flatten()
            .unwrap();
        assert!(last < 50.0, "RSI in downtrend should be < 50, got {}", last);
    }

    #[test]
    fn test_rsi_flat_prices_undefined() {
        let rsi = Rsi::default();
        let values = Rsi::rsi_values(&[10.0; 40], 14);
        assert!(values.iter().all(Option::is_none));
        assert_eq!(rsi.series(&create_flat_bars(40)), vec![None; 40]);
    }

    #[test]
    fn test_rsi_defined_once_prices_move() {
        let mut closes = vec![10.0; 30];
        closes[29] = 11.0;
        let values = Rsi::rsi_values(&closes, 14);
        assert!(values[..29].iter().all(Option::is_none));
        assert_eq!(values[29], Some(100.0));
    }

    #[test]
    fn test_rsi_value_range() {
        let rsi = Rsi::default();
        for value in rsi.series(&create_wavy_bars(80)).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_custom_period() {
        let rsi = Rsi::new(7);
        assert_eq!(rsi.min_periods(), 8);
        let values = rsi.series(&create_uptrend_bars(20));
        assert!(values[7].is_some());
    }
}
