//! Indicator engine.
//!
//! Normalizes a provider's raw bars into a clean `PriceBar` series, computes
//! every indicator per bar, drops bars where any indicator is undefined and
//! extracts the snapshot of the last remaining bar.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use super::indicators::{Adx, Atr, Ema, Macd, Obv, Rsi, StochRsi};
use super::Indicator;
use crate::error::AnalysisError;
use crate::types::{IndicatorSnapshot, PriceBar, RawSeries};

/// Columns every raw series must provide, after lower-casing.
pub const REQUIRED_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// Trimmed bars needed for the five-bar OBV comparison.
pub const OBV_LOOKBACK: usize = 5;

/// Trailing window for support and resistance.
pub const SUPPORT_RESISTANCE_WINDOW: usize = 60;

/// Normalized bars with their indicator snapshot.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    /// Bars on which every indicator is defined.
    pub bars: Vec<PriceBar>,
    /// EMA(20) aligned with `bars`.
    pub ema20: Vec<f64>,
    pub snapshot: IndicatorSnapshot,
}

/// Turn provider columns into ordered, complete bars.
///
/// Column names are matched case-insensitively. Rows with any missing
/// value are dropped; rows are sorted by date and a later duplicate date
/// replaces an earlier one.
pub fn normalize(raw: &RawSeries) -> Result<Vec<PriceBar>, AnalysisError> {
    let columns: BTreeMap<String, &Vec<Option<f64>>> = raw
        .columns
        .iter()
        .map(|(name, values)| (name.trim().to_lowercase(), values))
        .collect();

    let mut required = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for name in REQUIRED_COLUMNS {
        let column = columns
            .get(name)
            .ok_or_else(|| AnalysisError::MissingField(name.to_string()))?;
        required.push(*column);
    }

    let mut by_date = BTreeMap::new();
    for (row, date) in raw.dates.iter().enumerate() {
        if let Some(bar) = bar_at(&required, row, *date) {
            by_date.insert(bar.date, bar);
        }
    }

    Ok(by_date.into_values().collect())
}

fn bar_at(columns: &[&Vec<Option<f64>>], row: usize, date: NaiveDate) -> Option<PriceBar> {
    let value = |i: usize| -> Option<f64> {
        columns[i].get(row).copied().flatten().filter(|v| v.is_finite())
    };
    Some(PriceBar {
        date,
        open: value(0)?,
        high: value(1)?,
        low: value(2)?,
        close: value(3)?,
        volume: value(4)?,
    })
}

/// Indicators the snapshot is built from.
pub fn indicator_set() -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(Rsi::default()),
        Box::new(Macd::line()),
        Box::new(Macd::signal()),
        Box::new(Ema::new(10)),
        Box::new(Ema::new(20)),
        Box::new(Ema::new(50)),
        Box::new(Ema::new(200)),
        Box::new(Obv),
        Box::new(Atr::default()),
        Box::new(Adx::default()),
        Box::new(StochRsi::default()),
    ]
}

/// Valid bars needed before the slowest indicator is defined.
pub fn required_history(indicators: &[Box<dyn Indicator>]) -> usize {
    indicators
        .iter()
        .map(|i| i.min_periods())
        .max()
        .unwrap_or(0)
}

/// Indicator columns keyed by indicator id.
struct Columns(BTreeMap<String, Vec<Option<f64>>>);

impl Columns {
    fn compute(indicators: &[Box<dyn Indicator>], bars: &[PriceBar]) -> Self {
        let columns = indicators
            .iter()
            .map(|indicator| {
                let values = indicator.series(bars);
                debug!(
                    "{} first defined at bar {:?}",
                    indicator.name(),
                    values.iter().position(Option::is_some)
                );
                (indicator.id().to_string(), values)
            })
            .collect();
        Self(columns)
    }

    fn complete_at(&self, row: usize) -> bool {
        self.0.values().all(|c| c[row].is_some())
    }

    fn value(&self, id: &str, row: usize) -> Result<f64, AnalysisError> {
        self.0
            .get(id)
            .and_then(|c| c[row])
            .ok_or_else(|| AnalysisError::Computation(format!("{} undefined at bar {}", id, row)))
    }
}

/// Compute the indicator frame for a raw series.
///
/// Bars where any indicator is undefined are dropped, which removes the
/// warm-up prefix and any stretch where an oscillator has no value.
/// `pe_ratio` is carried into the snapshot untouched.
pub fn compute(
    symbol: &str,
    raw: &RawSeries,
    pe_ratio: Option<f64>,
) -> Result<IndicatorFrame, AnalysisError> {
    if raw.is_empty() {
        return Err(AnalysisError::DataUnavailable(symbol.to_string()));
    }

    let bars = normalize(raw)?;
    if bars.is_empty() {
        return Err(AnalysisError::DataUnavailable(symbol.to_string()));
    }

    let indicators = indicator_set();
    let required = required_history(&indicators);
    if bars.len() < required {
        return Err(AnalysisError::InsufficientHistory {
            required,
            available: bars.len(),
        });
    }

    let columns = Columns::compute(&indicators, &bars);
    let rows: Vec<usize> = (0..bars.len()).filter(|&i| columns.complete_at(i)).collect();
    if rows.len() < OBV_LOOKBACK {
        return Err(AnalysisError::InsufficientHistory {
            required: bars.len() - rows.len() + OBV_LOOKBACK,
            available: bars.len(),
        });
    }

    let last = rows[rows.len() - 1];
    let trimmed: Vec<PriceBar> = rows.iter().map(|&i| bars[i]).collect();
    let window = &trimmed[trimmed.len().saturating_sub(SUPPORT_RESISTANCE_WINDOW)..];
    let support_60d = window.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
    let resistance_60d = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);

    let snapshot = IndicatorSnapshot {
        rsi14: columns.value("rsi", last)?,
        macd_line: columns.value("macd", last)?,
        macd_signal: columns.value("macd_signal", last)?,
        ema10: columns.value("ema10", last)?,
        ema20: columns.value("ema20", last)?,
        ema50: columns.value("ema50", last)?,
        ema200: columns.value("ema200", last)?,
        obv_latest: columns.value("obv", last)?,
        obv_five_bars_ago: columns.value("obv", rows[rows.len() - OBV_LOOKBACK])?,
        atr14: columns.value("atr", last)?,
        adx14: columns.value("adx", last)?,
        stoch_rsi_k: columns.value("stoch_rsi_k", last)?,
        support_60d,
        resistance_60d,
        last_close: bars[last].close,
        pe_ratio,
    };

    if !snapshot.is_finite() {
        return Err(AnalysisError::Computation(
            "indicator produced a non-finite value".to_string(),
        ));
    }

    let ema20 = rows
        .iter()
        .map(|&i| columns.value("ema20", i))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "{}: {} bars, {} with every indicator defined, last close {:.2}",
        symbol,
        bars.len(),
        trimmed.len(),
        snapshot.last_close
    );

    Ok(IndicatorFrame {
        bars: trimmed,
        ema20,
        snapshot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_util::{create_flat_bars, create_wavy_bars};

    #[test]
    fn test_normalize_lowercases_columns() {
        let bars = create_wavy_bars(3);
        let mut raw = RawSeries::from_bars(&bars);
        let close = raw.columns.remove("close").unwrap();
        raw.insert_column("Close", close);
        let volume = raw.columns.remove("volume").unwrap();
        raw.insert_column("VOLUME", volume);

        assert_eq!(normalize(&raw).unwrap(), bars);
    }

    #[test]
    fn test_normalize_missing_column() {
        let mut raw = RawSeries::from_bars(&create_wavy_bars(3));
        raw.columns.remove("volume");
        match normalize(&raw) {
            Err(AnalysisError::MissingField(name)) => assert_eq!(name, "volume"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_drops_incomplete_rows() {
        let bars = create_wavy_bars(4);
        let mut raw = RawSeries::from_bars(&bars);
        raw.columns.get_mut("high").unwrap()[1] = None;
        raw.columns.get_mut("close").unwrap()[2] = Some(f64::NAN);

        let normalized = normalize(&raw).unwrap();
        assert_eq!(normalized, vec![bars[0], bars[3]]);
    }

    #[test]
    fn test_normalize_sorts_and_dedupes_dates() {
        let bars = create_wavy_bars(3);
        let mut shuffled = vec![bars[2], bars[0], bars[1]];
        let mut replacement = bars[0];
        replacement.close = 42.0;
        shuffled.push(replacement);

        let normalized = normalize(&RawSeries::from_bars(&shuffled)).unwrap();
        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].close, 42.0);
        assert!(normalized.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_compute_empty_is_data_unavailable() {
        let err = compute("ZZZ", &RawSeries::empty(), None).unwrap_err();
        assert!(matches!(err, AnalysisError::DataUnavailable(_)));
    }

    #[test]
    fn test_compute_all_rows_incomplete_is_data_unavailable() {
        let mut raw = RawSeries::from_bars(&create_wavy_bars(5));
        raw.insert_column("close", vec![None; 5]);
        let err = compute("ZZZ", &raw, None).unwrap_err();
        assert!(matches!(err, AnalysisError::DataUnavailable(_)));
    }

    #[test]
    fn test_compute_short_history() {
        let raw = RawSeries::from_bars(&create_wavy_bars(150));
        match compute("ABC", &raw, None) {
            Err(AnalysisError::InsufficientHistory {
                required,
                available,
            }) => {
                assert_eq!(required, 200);
                assert_eq!(available, 150);
            }
            other => panic!("expected InsufficientHistory, got {:?}", other),
        }
    }

    #[test]
    fn test_required_history_follows_slowest_indicator() {
        let indicators = indicator_set();
        assert_eq!(required_history(&indicators), 200);
        assert_eq!(required_history(&indicators[..3]), 34);
        assert_eq!(required_history(&[]), 0);
    }

    #[test]
    fn test_indicator_ids_are_unique() {
        let indicators = indicator_set();
        let ids: std::collections::BTreeSet<_> = indicators.iter().map(|i| i.id()).collect();
        assert_eq!(ids.len(), indicators.len());
    }

    #[test]
    fn test_compute_too_few_bars_after_warmup() {
        // EMA 200 is first defined at bar 199, leaving 2 bars
        let raw = RawSeries::from_bars(&create_wavy_bars(201));
        match compute("ABC", &raw, None) {
            Err(AnalysisError::InsufficientHistory { required, .. }) => {
                assert_eq!(required, 199 + OBV_LOOKBACK)
            }
            other => panic!("expected InsufficientHistory, got {:?}", other),
        }
    }

    #[test]
    fn test_compute_frame() {
        let bars = create_wavy_bars(260);
        let frame = compute("ABC", &RawSeries::from_bars(&bars), Some(15.0)).unwrap();

        // Trimmed to EMA 200 warm-up
        assert_eq!(frame.bars.len(), 61);
        assert_eq!(frame.bars[0].date, bars[199].date);
        assert_eq!(frame.ema20.len(), frame.bars.len());

        let s = frame.snapshot;
        assert_eq!(s.last_close, bars[259].close);
        assert_eq!(s.pe_ratio, Some(15.0));

        let obv = Obv.series(&bars);
        assert_eq!(s.obv_latest, obv[259].unwrap());
        assert_eq!(s.obv_five_bars_ago, obv[255].unwrap());

        let window = &bars[200..];
        let support = window.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
        let resistance = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(s.support_60d, support);
        assert_eq!(s.resistance_60d, resistance);
        assert!(s.is_finite());
    }

    #[test]
    fn test_compute_support_resistance_short_window() {
        let bars = create_wavy_bars(230);
        let frame = compute("ABC", &RawSeries::from_bars(&bars), None).unwrap();
        // Fewer than 60 bars after trimming: whole trimmed series is the window
        assert_eq!(frame.bars.len(), 31);
        let window = &bars[199..];
        let support = window.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
        let resistance = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(frame.snapshot.support_60d, support);
        assert_eq!(frame.snapshot.resistance_60d, resistance);
    }

    #[test]
    fn test_compute_flat_prices_yield_no_snapshot() {
        // RSI and StochRSI are undefined on every bar of a flat series
        let raw = RawSeries::from_bars(&create_flat_bars(260));
        match compute("HALT", &raw, None) {
            Err(AnalysisError::InsufficientHistory {
                required,
                available,
            }) => {
                assert_eq!(available, 260);
                assert_eq!(required, 260 + OBV_LOOKBACK);
            }
            other => panic!("expected InsufficientHistory, got {:?}", other),
        }
    }

    #[test]
    fn test_compute_overflowing_volume_is_computation_error() {
        let mut bars = create_wavy_bars(260);
        for bar in &mut bars {
            bar.volume = 1e308;
        }
        match compute("ABC", &RawSeries::from_bars(&bars), None) {
            Err(AnalysisError::Computation(message)) => {
                assert!(message.contains("non-finite"), "{}", message)
            }
            other => panic!("expected Computation, got {:?}", other),
        }
    }

    #[test]
    fn test_compute_uses_date_order() {
        let mut bars = create_wavy_bars(220);
        bars.reverse();
        let frame = compute("ABC", &RawSeries::from_bars(&bars), None).unwrap();
        assert_eq!(
            frame.bars.last().unwrap().date,
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap() + chrono::Duration::days(219)
        );
    }
}
