//! Technical indicator implementations.
//!
//! Every indicator produces one value per input bar so that the engine can
//! align them and drop the common warm-up prefix.

pub mod adx;
pub mod atr;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stoch_rsi;

pub use adx::Adx;
pub use atr::Atr;
pub use ema::Ema;
pub use macd::{Macd, MacdOutput};
pub use obv::Obv;
pub use rsi::Rsi;
pub use stoch_rsi::StochRsi;

use crate::types::PriceBar;

/// True Range of a bar given the previous bar.
pub(crate) fn true_range(current: &PriceBar, previous: &PriceBar) -> f64 {
    let hl = current.high - current.low;
    let hc = (current.high - previous.close).abs();
    let lc = (current.low - previous.close).abs();
    hl.max(hc).max(lc)
}

/// The contiguous run of defined values, with the index it starts at.
fn defined_run(values: &[Option<f64>]) -> Option<(usize, Vec<f64>)> {
    let start = values.iter().position(Option::is_some)?;
    let run = values[start..].iter().map_while(|v| *v).collect();
    Some((start, run))
}

/// SMA-seeded exponential smoothing with `alpha = 2 / (period + 1)`.
pub(crate) fn ema_series(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let multiplier = 2.0 / (period as f64 + 1.0);
    seeded_smoothing(values, period, |prev, value| {
        (value - prev) * multiplier + prev
    })
}

/// SMA-seeded Wilder smoothing (`alpha = 1 / period`).
pub(crate) fn wilder_series(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    seeded_smoothing(values, period, |prev, value| {
        (prev * (period - 1) as f64 + value) / period as f64
    })
}

fn seeded_smoothing<F>(values: &[Option<f64>], period: usize, step: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    let mut out = vec![None; values.len()];
    let Some((start, run)) = defined_run(values) else {
        return out;
    };
    if period == 0 || run.len() < period {
        return out;
    }

    // First value is the SMA of the first `period` inputs
    let mut smoothed = run[..period].iter().sum::<f64>() / period as f64;
    out[start + period - 1] = Some(smoothed);

    for (i, value) in run.iter().enumerate().skip(period) {
        smoothed = step(smoothed, *value);
        out[start + i] = Some(smoothed);
    }

    out
}

/// Rolling window reduction; `None` unless the whole window is defined and
/// `reduce` yields a value.
pub(crate) fn rolling<F>(values: &[Option<f64>], window: usize, reduce: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    let mut buf = Vec::with_capacity(window);
    for i in (window - 1)..values.len() {
        buf.clear();
        buf.extend(values[i + 1 - window..=i].iter().map_while(|v| *v));
        if buf.len() == window {
            out[i] = reduce(&buf);
        }
    }
    out
}
