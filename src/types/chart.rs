use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of trailing bars drawn on a report chart.
pub const CHART_WINDOW: usize = 60;

/// One dated value of a chart line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Horizontal reference line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelKind {
    Entry,
    StopLoss,
    TakeProfit,
}

/// Horizontal price line drawn across the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLevel {
    pub kind: LevelKind,
    pub label: String,
    pub price: f64,
}

/// Everything an external renderer needs to draw the report chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub close: Vec<ChartPoint>,
    pub ema20: Vec<ChartPoint>,
    pub levels: Vec<ChartLevel>,
}

impl ChartSpec {
    /// Price of the first level of the given kind.
    pub fn level(&self, kind: LevelKind) -> Option<f64> {
        self.levels.iter().find(|l| l.kind == kind).map(|l| l.price)
    }
}
