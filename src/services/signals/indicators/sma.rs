//! Simple Moving Average (SMA) helper.

use super::rolling;

/// Arithmetic mean over a trailing window of `period` values.
///
/// Used to smooth oscillator output (e.g. StochRSI %K).
pub(crate) fn sma_series(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, |window| {
        Some(window.iter().sum::<f64>() / window.len() as f64)
    })
}
