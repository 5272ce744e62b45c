//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema_series;
use crate::services::signals::Indicator;
use crate::types::PriceBar;

/// Which MACD line an instance reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    /// EMA(fast) - EMA(slow)
    Line,
    /// EMA(signal) of the MACD line
    Signal,
}

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
///
/// Bullish while the MACD line is above the signal line.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    output: MacdOutput,
}

impl Macd {
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
        output: MacdOutput,
    ) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
            output,
        }
    }

    /// Standard MACD(12, 26, 9) line.
    pub fn line() -> Self {
        Self::new(12, 26, 9, MacdOutput::Line)
    }

    /// Standard MACD(12, 26, 9) signal line.
    pub fn signal() -> Self {
        Self::new(12, 26, 9, MacdOutput::Signal)
    }

    /// Calculate both the MACD line and its signal line.
    pub fn lines(&self, bars: &[PriceBar]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
        let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();

        let fast_ema = ema_series(&closes, self.fast_period);
        let slow_ema = ema_series(&closes, self.slow_period);

        let macd_line: Vec<Option<f64>> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();

        let signal_line = ema_series(&macd_line, self.signal_period);

        (macd_line, signal_line)
    }
}

impl Indicator for Macd {
    fn id(&self) -> &str {
        match self.output {
            MacdOutput::Line => "macd",
            MacdOutput::Signal => "macd_signal",
        }
    }

    fn name(&self) -> &str {
        match self.output {
            MacdOutput::Line => "MACD",
            MacdOutput::Signal => "MACD Signal",
        }
    }

    fn min_periods(&self) -> usize {
        let slow = self.fast_period.max(self.slow_period);
        match self.output {
            MacdOutput::Line => slow,
            MacdOutput::Signal => slow + self.signal_period - 1,
        }
    }

    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let (line, signal) = self.lines(bars);
        match self.output {
            MacdOutput::Line => line,
            MacdOutput::Signal => signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_util::{create_downtrend_bars, create_uptrend_bars};

    #[test]
    fn test_macd_id_and_name() {
        assert_eq!(Macd::line().id(), "macd");
        assert_eq!(Macd::signal().id(), "macd_signal");
        assert_eq!(Macd::line().name(), "MACD");
    }

    #[test]
    fn test_macd_min_periods() {
        assert_eq!(Macd::line().min_periods(), 26);
        assert_eq!(Macd::signal().min_periods(), 34);
    }

    #[test]
    fn test_macd_warmup_matches_min_periods() {
        let bars = create_uptrend_bars(60);
        let line = Macd::line().series(&bars);
        let signal = Macd::signal().series(&bars);
        assert!(line[24].is_none() && line[25].is_some());
        assert!(signal[32].is_none() && signal[33].is_some());
    }

    #[test]
    fn test_macd_insufficient_data() {
        let bars = create_uptrend_bars(30);
        assert!(Macd::signal().series(&bars).iter().all(Option::is_none));
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let bars = create_uptrend_bars(80);
        let line = Macd::line().series(&bars).pop().flatten().unwrap();
        assert!(line > 0.0, "MACD should be positive in uptrend, got {}", line);
    }

    #[test]
    fn test_macd_negative_in_downtrend() {
        let bars = create_downtrend_bars(80);
        let line = Macd::line().series(&bars).pop().flatten().unwrap();
        assert!(line < 0.0, "MACD should be negative in downtrend, got {}", line);
    }
}
