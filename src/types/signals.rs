use serde::{Deserialize, Serialize};

/// P/E values at or above this are shown as unavailable.
pub const PE_DISPLAY_LIMIT: f64 = 999.0;

/// Indicator values taken from the last bar of a normalized series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub rsi14: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub ema10: f64,
    pub ema20: f64,
    pub ema50: f64,
    pub ema200: f64,
    pub obv_latest: f64,
    /// OBV of the fifth bar counting back from the end (the last bar included).
    pub obv_five_bars_ago: f64,
    pub atr14: f64,
    pub adx14: f64,
    pub stoch_rsi_k: f64,
    pub support_60d: f64,
    pub resistance_60d: f64,
    pub last_close: f64,
    pub pe_ratio: Option<f64>,
}

impl IndicatorSnapshot {
    /// P/E suitable for display, `None` when missing or implausibly large.
    pub fn displayable_pe(&self) -> Option<f64> {
        self.pe_ratio.filter(|pe| *pe < PE_DISPLAY_LIMIT)
    }

    /// Whether every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.rsi14,
            self.macd_line,
            self.macd_signal,
            self.ema10,
            self.ema20,
            self.ema50,
            self.ema200,
            self.obv_latest,
            self.obv_five_bars_ago,
            self.atr14,
            self.adx14,
            self.stoch_rsi_k,
            self.support_60d,
            self.resistance_60d,
            self.last_close,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Classified recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Buy => "Buy Signal 🟢",
            Signal::Sell => "Sell Signal 🔴",
            Signal::Hold => "Wait / Hold 🟡",
        }
    }
}

/// Buy and sell point totals plus the resulting signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub buy_score: u32,
    pub sell_score: u32,
    pub signal: Signal,
}

/// Named entry strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    DemandZone,
    Ema50Conservative,
    AnomalyEntry,
    AggressiveBreakout,
    DemandZoneLowRisk,
    ConservativeBelowClose,
}

impl Strategy {
    /// Get display name.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::DemandZone => "Demand Zone (EMA-20)",
            Strategy::Ema50Conservative => "EMA-50 (Conservative)",
            Strategy::AnomalyEntry => "Anomaly Entry (High Risk)",
            Strategy::AggressiveBreakout => "Aggressive Breakout (ADX Confirmed)",
            Strategy::DemandZoneLowRisk => "Demand Zone (EMA-20) - Low Risk",
            Strategy::ConservativeBelowClose => "Conservative Entry (Buy Below Close)",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An entry price paired with the strategy that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDecision {
    pub price: f64,
    pub strategy: Strategy,
}

/// Entry, stop-loss and take-profit levels for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePlan {
    pub entry_price: f64,
    pub strategy: Strategy,
    pub stop_loss_price: f64,
    pub risk_percent: f64,
    /// Targets at +5%, +10%, +15% and +20% of entry.
    pub take_profit_levels: [f64; 4],
    /// EMA-based entry before any guard or signal adjustment.
    pub baseline: EntryDecision,
}

impl TradePlan {
    /// The +10% target drawn on charts.
    pub fn take_profit_10(&self) -> f64 {
        self.take_profit_levels[1]
    }
}
