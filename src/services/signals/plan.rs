//! Entry, stop-loss and take-profit calculation.

use crate::types::{EntryDecision, IndicatorSnapshot, ScoreResult, Signal, Strategy, TradePlan};

/// Baseline entries above `last_close` times this are treated as anomalies.
pub const ANOMALY_RATIO: f64 = 1.05;
/// ADX level that confirms a breakout entry at market.
pub const BREAKOUT_ADX: f64 = 25.0;
/// Fraction of ATR placed under the close for conservative entries.
pub const CONSERVATIVE_ATR_FRACTION: f64 = 0.2;
/// Stops are never wider than this fraction of entry.
pub const MAX_STOP_FRACTION: f64 = 0.90;
pub const MIN_STOP_PRICE: f64 = 0.01;
pub const TAKE_PROFIT_STEPS: [f64; 4] = [1.05, 1.10, 1.15, 1.20];

/// EMA-based entry before any guard applies.
pub fn baseline(s: &IndicatorSnapshot) -> EntryDecision {
    if s.ema10 > s.ema20 {
        EntryDecision {
            price: s.ema20,
            strategy: Strategy::DemandZone,
        }
    } else {
        EntryDecision {
            price: s.ema50,
            strategy: Strategy::Ema50Conservative,
        }
    }
}

type Guard = fn(&IndicatorSnapshot, Signal, EntryDecision) -> Option<EntryDecision>;

fn anomaly(s: &IndicatorSnapshot, _: Signal, base: EntryDecision) -> Option<EntryDecision> {
    (base.price > s.last_close * ANOMALY_RATIO).then_some(EntryDecision {
        price: s.last_close,
        strategy: Strategy::AnomalyEntry,
    })
}

fn breakout(s: &IndicatorSnapshot, signal: Signal, _: EntryDecision) -> Option<EntryDecision> {
    (signal == Signal::Buy && s.last_close > s.ema20 && s.adx14 > BREAKOUT_ADX).then_some(
        EntryDecision {
            price: s.last_close,
            strategy: Strategy::AggressiveBreakout,
        },
    )
}

fn demand_zone(s: &IndicatorSnapshot, signal: Signal, base: EntryDecision) -> Option<EntryDecision> {
    (signal == Signal::Buy && s.last_close > s.ema20).then_some(EntryDecision {
        price: base.price,
        strategy: Strategy::DemandZoneLowRisk,
    })
}

fn fallback(s: &IndicatorSnapshot, _: Signal, base: EntryDecision) -> Option<EntryDecision> {
    // Never quote an entry above the market here
    if base.price > s.last_close {
        Some(EntryDecision {
            price: s.last_close - s.atr14 * CONSERVATIVE_ATR_FRACTION,
            strategy: Strategy::ConservativeBelowClose,
        })
    } else {
        Some(base)
    }
}

/// Guarded entry cases; first match wins.
const ENTRY_CASES: [Guard; 4] = [anomaly, breakout, demand_zone, fallback];

/// Pick the entry for a snapshot and signal.
pub fn select_entry(s: &IndicatorSnapshot, signal: Signal) -> EntryDecision {
    let base = baseline(s);
    ENTRY_CASES
        .iter()
        .find_map(|case| case(s, signal, base))
        .unwrap_or(base)
}

/// Stop loss for an entry, with the risk percentage of the unclamped stop.
pub fn stop_loss(entry: f64, atr14: f64) -> (f64, f64) {
    let raw = (entry - atr14).max(entry * MAX_STOP_FRACTION);
    let risk_percent = if entry == 0.0 {
        0.0
    } else {
        (entry - raw) / entry * 100.0
    };
    (raw.max(MIN_STOP_PRICE), risk_percent)
}

pub fn take_profit_levels(entry: f64) -> [f64; 4] {
    TAKE_PROFIT_STEPS.map(|step| entry * step)
}

/// Build the trade plan. Levels are computed whatever the signal.
pub fn build_plan(snapshot: &IndicatorSnapshot, score: &ScoreResult) -> TradePlan {
    let decision = select_entry(snapshot, score.signal);
    let (stop_loss_price, risk_percent) = stop_loss(decision.price, snapshot.atr14);

    TradePlan {
        entry_price: decision.price,
        strategy: decision.strategy,
        stop_loss_price,
        risk_percent,
        take_profit_levels: take_profit_levels(decision.price),
        baseline: baseline(snapshot),
    }
}
