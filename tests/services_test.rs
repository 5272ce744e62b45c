//! Unit tests for services module

use quantscope::services::resolver::{GOLD_MARKET, THAI_MARKET, US_MARKET};
use quantscope::services::signals::{build_plan, compute, score};
use quantscope::services::{report, resolve, sanitize};
use quantscope::types::{IndicatorSnapshot, PriceBar, RawSeries, ScoreResult, Signal, Strategy};
use chrono::{Duration, NaiveDate};

fn snapshot() -> IndicatorSnapshot {
    IndicatorSnapshot {
        rsi14: 50.0,
        macd_line: 0.0,
        macd_signal: 0.0,
        ema10: 100.0,
        ema20: 100.0,
        ema50: 100.0,
        ema200: 100.0,
        obv_latest: 1_000.0,
        obv_five_bars_ago: 1_000.0,
        atr14: 3.0,
        adx14: 15.0,
        stoch_rsi_k: 50.0,
        support_60d: 90.0,
        resistance_60d: 110.0,
        last_close: 100.0,
        pe_ratio: None,
    }
}

fn daily_bars(count: usize, close_at: impl Fn(usize) -> f64) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    (0..count)
        .map(|i| {
            let close = close_at(i);
            PriceBar {
                date: start + Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 10_000.0 + (i % 3) as f64 * 500.0,
            }
        })
        .collect()
}

// =========================================================================
// Resolver
// =========================================================================

#[test]
fn test_resolver_cases() {
    let gold = resolve("XAUUSD");
    assert_eq!(gold.len(), 1);
    assert_eq!(gold[0].symbol, "GC=F");
    assert_eq!(gold[0].market_label, GOLD_MARKET);

    let thai = resolve("KBANK.BK");
    assert_eq!(thai.len(), 1);
    assert_eq!(thai[0].market_label, THAI_MARKET);

    let ambiguous = resolve("CPALL");
    assert_eq!(ambiguous.len(), 2);
    assert_eq!(ambiguous[0].symbol, "CPALL");
    assert_eq!(ambiguous[0].market_label, US_MARKET);
    assert_eq!(ambiguous[1].symbol, "CPALL.BK");
    assert_eq!(ambiguous[1].market_label, THAI_MARKET);

    let class_share = resolve("BRK.A");
    assert_eq!(class_share.len(), 1);
    assert_eq!(class_share[0].market_label, US_MARKET);
}

#[test]
fn test_sanitize_then_resolve() {
    let ticker = sanitize(" xauusd\n", 15).unwrap();
    assert_eq!(resolve(&ticker)[0].symbol, "GC=F");
}

// =========================================================================
// Scoring
// =========================================================================

#[test]
fn test_score_buy_scenario() {
    let s = IndicatorSnapshot {
        adx14: 30.0,
        rsi14: 30.0,
        stoch_rsi_k: 15.0,
        macd_line: 2.0,
        macd_signal: 1.0,
        ema10: 105.0,
        ema20: 100.0,
        ema50: 95.0,
        ema200: 90.0,
        obv_latest: 2_000.0,
        ..snapshot()
    };
    let result = score(&s);
    assert_eq!((result.buy_score, result.sell_score), (8, 0));
    assert_eq!(result.signal, Signal::Buy);
}

#[test]
fn test_score_sell_scenario() {
    let s = IndicatorSnapshot {
        adx14: 10.0,
        rsi14: 70.0,
        stoch_rsi_k: 85.0,
        macd_line: 1.0,
        macd_signal: 2.0,
        ema10: 95.0,
        ema50: 90.0,
        obv_latest: 500.0,
        ..snapshot()
    };
    let result = score(&s);
    assert_eq!((result.buy_score, result.sell_score), (0, 7));
    assert_eq!(result.signal, Signal::Sell);
}

#[test]
fn test_score_idempotent() {
    let s = IndicatorSnapshot {
        rsi14: 33.0,
        ema10: 101.0,
        ..snapshot()
    };
    assert_eq!(score(&s), score(&s));
}

// =========================================================================
// Trade plan
// =========================================================================

#[test]
fn test_plan_anomaly_guard_priority() {
    let s = IndicatorSnapshot {
        ema10: 130.0,
        ema20: 120.0,
        adx14: 40.0,
        ..snapshot()
    };
    let buy = ScoreResult {
        buy_score: 6,
        sell_score: 0,
        signal: Signal::Buy,
    };
    let plan = build_plan(&s, &buy);
    assert_eq!(plan.strategy, Strategy::AnomalyEntry);
    assert_eq!(plan.entry_price, 100.0);
}

#[test]
fn test_plan_stop_loss_floor() {
    let s = IndicatorSnapshot {
        ema10: 0.05,
        ema20: 0.04,
        ema50: 0.03,
        last_close: 0.039,
        atr14: 1.0,
        ..snapshot()
    };
    let plan = build_plan(&s, &score(&s));
    assert!(plan.stop_loss_price >= 0.01);
}

#[test]
fn test_plan_take_profit_ladder() {
    let plan = build_plan(&snapshot(), &score(&snapshot()));
    let tp = plan.take_profit_levels;
    assert!(tp[0] < tp[1] && tp[1] < tp[2] && tp[2] < tp[3]);
    for (level, k) in tp.iter().zip([0.05, 0.10, 0.15, 0.20]) {
        assert!((level - plan.entry_price * (1.0 + k)).abs() < 1e-9);
    }
}

// =========================================================================
// Engine to report
// =========================================================================

#[test]
fn test_pipeline_from_raw_bars() {
    let bars = daily_bars(252, |i| 50.0 + (i as f64 * 0.15).sin() * 4.0 + i as f64 * 0.05);
    let frame = compute("SET50", &RawSeries::from_bars(&bars), Some(1_200.0)).unwrap();
    let result = score(&frame.snapshot);
    let plan = build_plan(&frame.snapshot, &result);

    let candidate = resolve("SET50").remove(0);
    let report = report::candidate_report(&candidate, "SET50", &frame, result, plan);
    assert!(report.text.contains("N/A (Data Anomaly)"));
    assert_eq!(report.chart.as_ref().unwrap().close.len(), 53);
}

#[test]
fn test_pipeline_rejects_short_history() {
    let bars = daily_bars(199, |i| 20.0 + i as f64 * 0.1);
    assert!(compute("ABC", &RawSeries::from_bars(&bars), None).is_err());
}
