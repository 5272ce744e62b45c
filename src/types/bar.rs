use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Columnar bar data as delivered by a market-data provider.
///
/// Column names are whatever the provider uses ("Close", "close", ...);
/// values may be missing for individual rows.
#[derive(Debug, Clone, Default)]
pub struct RawSeries {
    pub dates: Vec<NaiveDate>,
    pub columns: HashMap<String, Vec<Option<f64>>>,
}

impl RawSeries {
    /// Create an empty series with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from fully populated bars, using lower-case column names.
    pub fn from_bars(bars: &[PriceBar]) -> Self {
        let mut series = Self {
            dates: bars.iter().map(|b| b.date).collect(),
            columns: HashMap::new(),
        };
        series.insert_column("open", bars.iter().map(|b| Some(b.open)).collect());
        series.insert_column("high", bars.iter().map(|b| Some(b.high)).collect());
        series.insert_column("low", bars.iter().map(|b| Some(b.low)).collect());
        series.insert_column("close", bars.iter().map(|b| Some(b.close)).collect());
        series.insert_column("volume", bars.iter().map(|b| Some(b.volume)).collect());
        series
    }

    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        self.columns.insert(name.into(), values);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Fundamentals record for a symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundamentals {
    /// Trailing price/earnings ratio; `None` when the provider has none.
    pub trailing_pe: Option<f64>,
}
