//! Ticker resolution.
//!
//! Expands one user-supplied symbol into the market candidates worth
//! analyzing. Pure string classification; no I/O.

use crate::types::Candidate;

pub const US_MARKET: &str = "US Stocks/ETFs";
pub const THAI_MARKET: &str = "Thai Stock (SET)";
pub const GOLD_MARKET: &str = "Gold (Commodity Futures)";

/// Yahoo symbol for COMEX gold futures.
const GOLD_FUTURES_SYMBOL: &str = "GC=F";
const THAI_SUFFIX: &str = ".BK";

/// Resolve a trimmed, upper-cased ticker into ordered candidates.
///
/// Short alphabetic tickers are ambiguous between US and Thai listings,
/// so both are returned, US first.
pub fn resolve(ticker: &str) -> Vec<Candidate> {
    if ticker.is_empty() {
        return Vec::new();
    }

    if ticker == "XAUUSD" {
        return vec![Candidate::new(GOLD_FUTURES_SYMBOL, GOLD_MARKET)];
    }

    if ticker.ends_with(THAI_SUFFIX) {
        return vec![Candidate::new(ticker, THAI_MARKET)];
    }

    let len = ticker.chars().count();
    if (3..=5).contains(&len) && !ticker.chars().any(char::is_numeric) {
        return vec![
            Candidate::new(ticker, US_MARKET),
            Candidate::new(format!("{}{}", ticker, THAI_SUFFIX), THAI_MARKET),
        ];
    }

    vec![Candidate::new(ticker, US_MARKET)]
}

/// Trim and upper-case raw user input, rejecting empty or overlong tickers.
pub fn sanitize(raw: &str, max_len: usize) -> Option<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() || ticker.chars().count() > max_len {
        return None;
    }
    Some(ticker)
}
