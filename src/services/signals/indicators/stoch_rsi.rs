//! Stochastic RSI indicator.

use super::{rolling, sma::sma_series};
use crate::services::signals::Indicator;
use crate::types::PriceBar;

use super::rsi::Rsi;

/// Stochastic RSI %K.
///
/// Applies the stochastic formula to RSI instead of price:
/// StochRSI = (RSI - Lowest RSI) / (Highest RSI - Lowest RSI) * 100
/// %K = SMA(k_smoothing) of StochRSI
///
/// Undefined wherever the 14-bar RSI window is flat.
///
/// Signals:
/// - Below 20: Oversold (bullish)
/// - Above 80: Overbought (bearish)
pub struct StochRsi {
    rsi_period: usize,
    stoch_period: usize,
    k_smoothing: usize,
}

impl Default for StochRsi {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            stoch_period: 14,
            k_smoothing: 3,
        }
    }
}

impl Indicator for StochRsi {
    fn id(&self) -> &str {
        "stoch_rsi_k"
    }

    fn name(&self) -> &str {
        "StochRSI %K"
    }

    fn min_periods(&self) -> usize {
        self.rsi_period + self.stoch_period + self.k_smoothing - 1
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let rsi = Rsi::rsi_values(&closes, self.rsi_period);

        let stoch = rolling(&rsi, self.stoch_period, |window| {
            let lowest = window.iter().copied().fold(f64::INFINITY, f64::min);
            let highest = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let current = window[window.len() - 1];

            // A flat RSI window has no position to report
            (highest != lowest).then(|| ((current - lowest) / (highest - lowest)) * 100.0)
        });

        sma_series(&stoch, self.k_smoothing)
    }
}
