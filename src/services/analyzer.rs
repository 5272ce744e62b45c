//! Per-request analysis pipeline.
//!
//! Resolves a ticker into candidates, fetches each one from the market-data
//! source and runs the CPU-bound engine, scoring and planning off the async
//! workers.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::report;
use super::resolver;
use super::signals::{build_plan, compute, scoring};
use crate::error::AnalysisError;
use crate::sources::MarketDataSource;
use crate::types::{AnalysisOutcome, Candidate, CandidateReport, RawSeries};

/// Runs the full analysis for one ticker at a time.
pub struct Analyzer {
    source: Arc<dyn MarketDataSource>,
}

impl Analyzer {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }

    /// Analyze a trimmed, upper-cased ticker.
    ///
    /// Candidates are processed in resolver order, one after another.
    pub async fn analyze(&self, ticker: &str) -> AnalysisOutcome {
        let candidates = resolver::resolve(ticker);
        info!("Analyzing {} across {} candidate(s)", ticker, candidates.len());

        let mut reports = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            match self.analyze_candidate(ticker, candidate).await {
                Ok(report) => reports.push(report),
                Err(e) if e.is_silent_skip() => {
                    warn!("Skipping {} ({}): {}", candidate.symbol, candidate.market_label, e);
                }
                Err(e) => {
                    error!("Error analyzing {}: {}", candidate.symbol, e);
                    reports.push(report::error_report(candidate, ticker, &e));
                }
            }
        }

        let outcome = report::aggregate(ticker, reports);
        info!(
            "Analysis for {} completed with {} report(s)",
            ticker,
            outcome.reports().len()
        );
        outcome
    }

    async fn analyze_candidate(
        &self,
        ticker: &str,
        candidate: &Candidate,
    ) -> Result<CandidateReport, AnalysisError> {
        let raw = self.source.fetch_history(&candidate.symbol).await?;
        if raw.is_empty() {
            return Err(AnalysisError::DataUnavailable(candidate.symbol.clone()));
        }

        let pe_ratio = match self.source.fetch_fundamentals(&candidate.symbol).await {
            Ok(fundamentals) => fundamentals.trailing_pe,
            Err(e) => {
                warn!("Fundamentals unavailable for {}: {}", candidate.symbol, e);
                None
            }
        };

        let ticker = ticker.to_string();
        let candidate = candidate.clone();
        tokio::task::spawn_blocking(move || run_pipeline(&ticker, &candidate, &raw, pe_ratio))
            .await
            .map_err(|e| AnalysisError::Computation(format!("analysis task failed: {}", e)))?
    }
}

/// Engine, scoring, plan and report for one candidate's bars.
pub fn run_pipeline(
    ticker: &str,
    candidate: &Candidate,
    raw: &RawSeries,
    pe_ratio: Option<f64>,
) -> Result<CandidateReport, AnalysisError> {
    let frame = compute(&candidate.symbol, raw, pe_ratio)?;
    let score = scoring::score(&frame.snapshot);
    let plan = build_plan(&frame.snapshot, &score);

    debug!(
        "{}: {:?} ({}:{}) via {:?}, entry {:.2} [{}]",
        candidate.symbol,
        score.signal,
        score.buy_score,
        score.sell_score,
        plan.strategy,
        plan.entry_price,
        scoring::contributing_rules(&frame.snapshot).join(", ")
    );

    Ok(report::candidate_report(candidate, ticker, &frame, score, plan))
}
