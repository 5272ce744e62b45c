//! On-Balance Volume (OBV) indicator.

use crate::services::signals::Indicator;
use crate::types::PriceBar;

/// OBV (On-Balance Volume) indicator.
///
/// Cumulative volume indicator:
/// - If close > previous close: OBV += volume
/// - If close < previous close: OBV -= volume
///
/// The first bar counts as an up bar. Rising OBV confirms buying pressure.
pub struct Obv;

impl Indicator for Obv {
    fn id(&self) -> &str {
        "obv"
    }

    fn name(&self) -> &str {
        "OBV"
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let mut obv = 0.0;
        let mut values = Vec::with_capacity(bars.len());

        for (i, bar) in bars.iter().enumerate() {
            if i == 0 || bar.close > bars[i - 1].close {
                obv += bar.volume;
            } else if bar.close < bars[i - 1].close {
                obv -= bar.volume;
            }
            values.push(Some(obv));
        }

        values
    }
}
