//! Report assembly.
//!
//! Turns a computed frame, score and plan into the markdown summary and chart
//! spec for one candidate, and merges candidate reports into the response.

use std::fmt::Write;

use crate::services::signals::IndicatorFrame;
use crate::types::{
    AnalysisOutcome, Candidate, CandidateReport, ChartLevel, ChartPoint, ChartSpec,
    IndicatorSnapshot, LevelKind, ScoreResult, Signal, TradePlan, CHART_WINDOW,
};

pub const DISCLAIMER: &str =
    "_*Note: this signal comes from an automated formula and is not investment advice.*_";

fn trend_label(adx: f64) -> &'static str {
    if adx > 25.0 {
        "Strong Trend"
    } else {
        "Weak Trend"
    }
}

fn stoch_label(k: f64) -> &'static str {
    if k < 20.0 {
        "Oversold"
    } else if k > 80.0 {
        "Overbought"
    } else {
        "Neutral"
    }
}

fn cross_label(fast: f64, slow: f64) -> &'static str {
    if fast > slow {
        "Golden Cross (Up)"
    } else {
        "Dead Cross (Down)"
    }
}

fn write_plan(text: &mut String, score: &ScoreResult, plan: &TradePlan) -> std::fmt::Result {
    writeln!(text, "--- *Price Targets (long side)* ---")?;
    if score.signal == Signal::Buy {
        let tp = plan.take_profit_levels;
        writeln!(text, "**Strategy:** **{}**", plan.strategy)?;
        writeln!(text, "**Buy Entry:** **`${:.2}`**", plan.entry_price)?;
        writeln!(
            text,
            "**Stop-Loss:** `${:.2}` ({:.2}% Risk)",
            plan.stop_loss_price, plan.risk_percent
        )?;
        writeln!(text, "**Take Profit 5%:** `${:.2}`", tp[0])?;
        writeln!(text, "**Take Profit 10%:** `${:.2}`", tp[1])?;
        writeln!(text, "**Take Profit 15%:** `${:.2}`", tp[2])?;
        writeln!(text, "**Take Profit 20%:** `${:.2}`", tp[3])?;
    } else {
        writeln!(text, "**Recommendation:** **Not recommended to buy right now**")?;
        writeln!(
            text,
            "Consider buying near support at: `{:.2}` ({})",
            plan.baseline.price, plan.baseline.strategy
        )?;
        writeln!(text, "Stop-loss to consider: `{:.2}`", plan.stop_loss_price)?;
    }
    writeln!(text)
}

fn write_indicators(text: &mut String, s: &IndicatorSnapshot) -> std::fmt::Result {
    writeln!(text, "--- *Indicator Details* ---")?;
    writeln!(text, "**ADX (14):** {:.2} ({})", s.adx14, trend_label(s.adx14))?;
    writeln!(
        text,
        "**StochRSI (K):** {:.2} ({})",
        s.stoch_rsi_k,
        stoch_label(s.stoch_rsi_k)
    )?;
    writeln!(text, "**RSI (14):** {:.2}", s.rsi14)?;
    writeln!(
        text,
        "**MACD:** {}",
        if s.macd_line > s.macd_signal {
            "Bullish"
        } else {
            "Bearish"
        }
    )?;
    writeln!(text, "**EMA (10/20):** {}", cross_label(s.ema10, s.ema20))?;
    writeln!(text, "**EMA (50/200):** {}", cross_label(s.ema50, s.ema200))?;
    writeln!(text, "**ATR (14):** ${:.2}", s.atr14)?;
    writeln!(
        text,
        "**60-Day Support / Resistance:** `{:.2}` / `{:.2}`",
        s.support_60d, s.resistance_60d
    )
}

fn write_summary(
    text: &mut String,
    candidate: &Candidate,
    original_ticker: &str,
    snapshot: &IndicatorSnapshot,
    score: &ScoreResult,
    plan: &TradePlan,
) -> std::fmt::Result {
    writeln!(
        text,
        "📈 **Signal Summary {} Ticker: {}**\n",
        candidate.market_label,
        original_ticker.to_uppercase()
    )?;
    writeln!(text, "**Current Price:** **`${:.2}`**", snapshot.last_close)?;
    match snapshot.displayable_pe() {
        Some(pe) => writeln!(text, "**P/E Ratio:** **{:.2}**", pe)?,
        None => writeln!(text, "**P/E Ratio:** **N/A (Data Anomaly)**")?,
    }
    writeln!(
        text,
        "**Signal:** **{} (score {}:{})**\n",
        score.signal.label(),
        score.buy_score,
        score.sell_score
    )?;
    write_plan(text, score, plan)?;
    write_indicators(text, snapshot)?;
    write!(text, "\n{}", DISCLAIMER)
}

/// Markdown summary for one analyzed candidate.
pub fn summary_text(
    candidate: &Candidate,
    original_ticker: &str,
    snapshot: &IndicatorSnapshot,
    score: &ScoreResult,
    plan: &TradePlan,
) -> String {
    let mut text = String::new();
    // Writing into a String cannot fail
    let _ = write_summary(&mut text, candidate, original_ticker, snapshot, score, plan);
    text
}

/// Chart spec over the last `CHART_WINDOW` bars with plan levels.
pub fn chart_spec(
    candidate: &Candidate,
    original_ticker: &str,
    frame: &IndicatorFrame,
    plan: &TradePlan,
) -> ChartSpec {
    let start = frame.bars.len().saturating_sub(CHART_WINDOW);
    let bars = &frame.bars[start..];

    let close = bars
        .iter()
        .map(|b| ChartPoint {
            date: b.date,
            value: b.close,
        })
        .collect();
    let ema20 = bars
        .iter()
        .zip(&frame.ema20[start..])
        .map(|(b, v)| ChartPoint {
            date: b.date,
            value: *v,
        })
        .collect();

    let level = |kind, name: &str, price: f64| ChartLevel {
        kind,
        label: format!("{}: {:.2}", name, price),
        price,
    };

    ChartSpec {
        title: format!(
            "{} ({}) Price & Targets (last {} days)",
            original_ticker.to_uppercase(),
            candidate.market_label,
            CHART_WINDOW
        ),
        close,
        ema20,
        levels: vec![
            level(LevelKind::Entry, "Buy Entry", plan.entry_price),
            level(LevelKind::StopLoss, "Stop Loss", plan.stop_loss_price),
            level(LevelKind::TakeProfit, "TP 10%", plan.take_profit_10()),
        ],
    }
}

/// Full report for a successfully analyzed candidate.
pub fn candidate_report(
    candidate: &Candidate,
    original_ticker: &str,
    frame: &IndicatorFrame,
    score: ScoreResult,
    plan: TradePlan,
) -> CandidateReport {
    CandidateReport {
        market_label: candidate.market_label.clone(),
        original_ticker: original_ticker.to_string(),
        resolved_ticker: candidate.symbol.clone(),
        text: summary_text(candidate, original_ticker, &frame.snapshot, &score, &plan),
        chart: Some(chart_spec(candidate, original_ticker, frame, &plan)),
        error: None,
        score: Some(score),
        plan: Some(plan),
    }
}

/// Report carrying only an error message.
pub fn error_report(
    candidate: &Candidate,
    original_ticker: &str,
    error: &impl std::fmt::Display,
) -> CandidateReport {
    let message = format!(
        "Error analyzing {} ({}): {}",
        original_ticker, candidate.market_label, error
    );
    CandidateReport {
        market_label: candidate.market_label.clone(),
        original_ticker: original_ticker.to_string(),
        resolved_ticker: candidate.symbol.clone(),
        text: message.clone(),
        chart: None,
        error: Some(message),
        score: None,
        plan: None,
    }
}

pub fn not_found_message(ticker: &str) -> String {
    format!(
        "Sorry, no data found for ticker '{}' in the supported markets.",
        ticker
    )
}

/// Merge candidate reports; no reports at all becomes `NotFound`.
pub fn aggregate(ticker: &str, reports: Vec<CandidateReport>) -> AnalysisOutcome {
    if reports.is_empty() {
        AnalysisOutcome::NotFound {
            ticker: ticker.to_string(),
            message: not_found_message(ticker),
        }
    } else {
        AnalysisOutcome::Reports { reports }
    }
}
