//! Average True Range (ATR) indicator.

use super::{true_range, wilder_series};
use crate::services::signals::Indicator;
use crate::types::PriceBar;

/// ATR (Average True Range) indicator.
///
/// Measures market volatility by calculating the average of true ranges:
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|)
///
/// Reported in price units; used to size stops.
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Indicator for Atr {
    fn id(&self) -> &str {
        "atr"
    }

    fn name(&self) -> &str {
        "ATR (14)"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let mut true_ranges = vec![None; bars.len()];
        for i in 1..bars.len() {
            true_ranges[i] = Some(true_range(&bars[i], &bars[i - 1]));
        }

        // Wilder's smoothing, seeded with the mean of the first `period` ranges
        wilder_series(&true_ranges, self.period)
    }
}
