//! Rule-based scoring of an indicator snapshot.

use crate::types::{IndicatorSnapshot, ScoreResult, Signal};

/// Buy score at which the signal becomes `Buy`.
pub const BUY_THRESHOLD: u32 = 4;
/// Sell score at which a non-buy signal becomes `Sell`.
pub const SELL_THRESHOLD: u32 = 3;

/// Points awarded by one rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Points {
    pub buy: u32,
    pub sell: u32,
}

impl Points {
    const NONE: Points = Points { buy: 0, sell: 0 };

    const fn buy(n: u32) -> Self {
        Points { buy: n, sell: 0 }
    }

    const fn sell(n: u32) -> Self {
        Points { buy: 0, sell: n }
    }
}

type Rule = fn(&IndicatorSnapshot) -> Points;

fn trend_strength(s: &IndicatorSnapshot) -> Points {
    if s.adx14 > 20.0 {
        Points::buy(1)
    } else {
        Points::NONE
    }
}

fn rsi(s: &IndicatorSnapshot) -> Points {
    if s.rsi14 < 35.0 {
        Points::buy(1)
    } else if s.rsi14 > 65.0 {
        Points::sell(1)
    } else {
        Points::NONE
    }
}

fn stoch_rsi(s: &IndicatorSnapshot) -> Points {
    if s.stoch_rsi_k < 20.0 {
        Points::buy(1)
    } else if s.stoch_rsi_k > 80.0 {
        Points::sell(1)
    } else {
        Points::NONE
    }
}

fn macd(s: &IndicatorSnapshot) -> Points {
    if s.macd_line > s.macd_signal {
        Points::buy(1)
    } else if s.macd_line < s.macd_signal {
        Points::sell(2)
    } else {
        Points::NONE
    }
}

fn short_ema(s: &IndicatorSnapshot) -> Points {
    if s.ema10 > s.ema20 {
        Points::buy(2)
    } else {
        Points::sell(1)
    }
}

fn long_ema(s: &IndicatorSnapshot) -> Points {
    if s.ema50 > s.ema200 {
        Points::buy(1)
    } else {
        Points::sell(1)
    }
}

fn volume_flow(s: &IndicatorSnapshot) -> Points {
    if s.obv_latest > s.obv_five_bars_ago {
        Points::buy(1)
    } else {
        Points::sell(1)
    }
}

/// Scoring rules in evaluation order.
const RULES: [(&str, Rule); 7] = [
    ("adx", trend_strength),
    ("rsi", rsi),
    ("stoch_rsi", stoch_rsi),
    ("macd", macd),
    ("ema_10_20", short_ema),
    ("ema_50_200", long_ema),
    ("obv", volume_flow),
];

/// Classify final totals.
pub fn classify(buy_score: u32, sell_score: u32) -> Signal {
    if buy_score >= BUY_THRESHOLD {
        Signal::Buy
    } else if sell_score >= SELL_THRESHOLD {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Score a snapshot. Every rule is applied before classification runs.
pub fn score(snapshot: &IndicatorSnapshot) -> ScoreResult {
    let total = RULES.iter().fold(Points::default(), |acc, (_, rule)| {
        let p = rule(snapshot);
        Points {
            buy: acc.buy + p.buy,
            sell: acc.sell + p.sell,
        }
    });

    ScoreResult {
        buy_score: total.buy,
        sell_score: total.sell,
        signal: classify(total.buy, total.sell),
    }
}

/// Names of the rules that awarded points, for logging.
pub fn contributing_rules(snapshot: &IndicatorSnapshot) -> Vec<&'static str> {
    RULES
        .iter()
        .filter(|(_, rule)| rule(snapshot) != Points::NONE)
        .map(|(name, _)| *name)
        .collect()
}
