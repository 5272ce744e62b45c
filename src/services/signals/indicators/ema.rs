//! Exponential Moving Average (EMA) indicator.

use super::ema_series;
use crate::services::signals::Indicator;
use crate::types::PriceBar;

/// EMA (Exponential Moving Average) of closing prices.
///
/// Like SMA but gives more weight to recent prices. The first value is the
/// SMA of the first `period` closes.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Ema {
    fn id(&self) -> &str {
        match self.period {
            10 => "ema10",
            20 => "ema20",
            50 => "ema50",
            200 => "ema200",
            _ => "ema",
        }
    }

    fn name(&self) -> &str {
        match self.period {
            10 => "EMA (10)",
            20 => "EMA (20)",
            50 => "EMA (50)",
            200 => "EMA (200)",
            _ => "EMA",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();
        ema_series(&closes, self.period)
    }
}
