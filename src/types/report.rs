use serde::{Deserialize, Serialize};

use super::{ChartSpec, ScoreResult, TradePlan};

/// One (symbol, market) pair to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub symbol: String,
    pub market_label: String,
}

impl Candidate {
    pub fn new(symbol: impl Into<String>, market_label: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            market_label: market_label.into(),
        }
    }
}

/// Report for a single analyzed candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    pub market_label: String,
    pub original_ticker: String,
    pub resolved_ticker: String,
    /// Markdown summary, or the error message when `error` is set.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<TradePlan>,
}

impl CandidateReport {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Candidate reports in resolver order; never empty.
    Reports { reports: Vec<CandidateReport> },
    /// No candidate produced any data.
    NotFound { ticker: String, message: String },
}

impl AnalysisOutcome {
    pub fn reports(&self) -> &[CandidateReport] {
        match self {
            AnalysisOutcome::Reports { reports } => reports,
            AnalysisOutcome::NotFound { .. } => &[],
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AnalysisOutcome::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_serialization() {
        let outcome = AnalysisOutcome::NotFound {
            ticker: "ZZZZ".to_string(),
            message: "nothing".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["ticker"], "ZZZZ");
        assert!(outcome.reports().is_empty());
        assert!(outcome.is_not_found());
    }

    #[test]
    fn test_error_report_skips_empty_fields() {
        let report = CandidateReport {
            market_label: "US Stocks/ETFs".to_string(),
            original_ticker: "AAPL".to_string(),
            resolved_ticker: "AAPL".to_string(),
            text: "boom".to_string(),
            chart: None,
            error: Some("boom".to_string()),
            score: None,
            plan: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["resolvedTicker"], "AAPL");
        assert!(json.get("chart").is_none());
        assert!(json.get("plan").is_none());
        assert!(report.is_error());
    }
}
