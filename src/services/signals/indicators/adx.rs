//! Average Directional Index (ADX) indicator.

use super::{true_range, wilder_series};
use crate::services::signals::Indicator;
use crate::types::PriceBar;

/// ADX (Average Directional Index) indicator.
///
/// Measures trend strength (not direction):
/// - Below 20: Weak trend / ranging market
/// - 20-40: Trending
/// - Above 40: Strong trend
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Adx {
    /// Directional index from smoothed +DM, -DM and TR.
    fn dx(plus_dm: f64, minus_dm: f64, tr: f64) -> f64 {
        if tr == 0.0 {
            return 0.0;
        }

        let plus_di = (plus_dm / tr) * 100.0;
        let minus_di = (minus_dm / tr) * 100.0;

        let di_sum = plus_di + minus_di;
        if di_sum > 0.0 {
            ((plus_di - minus_di).abs() / di_sum) * 100.0
        } else {
            0.0
        }
    }
}

impl Indicator for Adx {
    fn id(&self) -> &str {
        "adx"
    }

    fn name(&self) -> &str {
        "ADX (14)"
    }

    fn min_periods(&self) -> usize {
        self.period * 2
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let mut plus_dm = vec![None; bars.len()];
        let mut minus_dm = vec![None; bars.len()];
        let mut tr = vec![None; bars.len()];

        // Calculate DM and TR
        for i in 1..bars.len() {
            let current = &bars[i];
            let previous = &bars[i - 1];

            let up_move = current.high - previous.high;
            let down_move = previous.low - current.low;

            plus_dm[i] = Some(if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            });
            minus_dm[i] = Some(if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            });
            tr[i] = Some(true_range(current, previous));
        }

        // Smooth the values
        let smoothed_plus_dm = wilder_series(&plus_dm, self.period);
        let smoothed_minus_dm = wilder_series(&minus_dm, self.period);
        let smoothed_tr = wilder_series(&tr, self.period);

        let dx_values: Vec<Option<f64>> = (0..bars.len())
            .map(|i| {
                Some(Self::dx(
                    smoothed_plus_dm[i]?,
                    smoothed_minus_dm[i]?,
                    smoothed_tr[i]?,
                ))
            })
            .collect();

        // ADX is the smoothed DX
        wilder_series(&dx_values, self.period)
    }
}
