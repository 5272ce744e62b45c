//! Yahoo Finance API client for historical daily bars and fundamentals.
//!
//! Uses the unofficial chart and quoteSummary endpoints (no API key).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{MarketDataSource, SourceError};
use crate::config::Config;
use crate::types::{Fundamentals, RawSeries};

/// Exchange suffixes that Yahoo expects verbatim.
const EXCHANGE_SUFFIXES: &[&str] = &[".BK"];

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    meta: YahooMeta,
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    symbol: String,
    /// Exchange offset from UTC in seconds.
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// quoteSummary response, summaryDetail module only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    summary_detail: Option<SummaryDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
/// but keeps exchange suffixes such as `.BK`.
fn normalize_yahoo_symbol(symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    match EXCHANGE_SUFFIXES.iter().find(|s| upper.ends_with(*s)) {
        Some(suffix) => {
            let base = &upper[..upper.len() - suffix.len()];
            format!("{}{}", base.replace('.', "-"), suffix)
        }
        None => upper.replace('.', "-"),
    }
}

/// Convert a bar timestamp to the exchange-local trading date.
fn trading_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}

fn is_not_found(error: &YahooError) -> bool {
    error.code.eq_ignore_ascii_case("not found")
}

/// Build a raw series from a chart result, keeping the provider's column names.
fn chart_to_raw_series(result: YahooResult) -> Result<RawSeries, SourceError> {
    let Some(timestamps) = result.timestamp else {
        // Yahoo omits timestamps entirely for symbols with no trading history.
        return Ok(RawSeries::empty());
    };

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::Malformed("no quote data in response".to_string()))?;

    let offset = result.meta.gmtoffset.unwrap_or(0);
    let dates = timestamps
        .iter()
        .map(|&ts| trading_date(ts, offset))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| SourceError::Malformed("timestamp out of range".to_string()))?;

    let mut series = RawSeries {
        dates,
        ..RawSeries::default()
    };

    let columns = [
        ("Open", quote.open),
        ("High", quote.high),
        ("Low", quote.low),
        ("Close", quote.close),
        ("Volume", quote.volume),
    ];
    for (name, values) in columns {
        if let Some(mut values) = values {
            values.resize(series.len(), None);
            series.insert_column(name, values);
        }
    }

    debug!(
        "Yahoo returned {} rows for {}",
        series.len(),
        result.meta.symbol
    );

    Ok(series)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
    range: String,
    interval: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client from configuration.
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
            range: config.history_range.clone(),
            interval: config.history_interval.clone(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            self.base_url,
            normalize_yahoo_symbol(symbol),
            self.range,
            self.interval
        )
    }

    fn summary_url(&self, symbol: &str) -> String {
        format!(
            "{}/v10/finance/quoteSummary/{}?modules=summaryDetail",
            self.base_url,
            normalize_yahoo_symbol(symbol)
        )
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    async fn fetch_history(&self, symbol: &str) -> Result<RawSeries, SourceError> {
        let url = self.chart_url(symbol);
        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(RawSeries::empty());
        }
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let data: YahooChartResponse = response.json().await?;

        if let Some(error) = data.chart.error {
            if is_not_found(&error) {
                return Ok(RawSeries::empty());
            }
            return Err(SourceError::Api {
                code: error.code,
                description: error.description,
            });
        }

        match data.chart.result.and_then(|r| r.into_iter().next()) {
            Some(result) => chart_to_raw_series(result),
            None => Ok(RawSeries::empty()),
        }
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, SourceError> {
        let url = self.summary_url(symbol);
        debug!("Fetching Yahoo Finance fundamentals: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let data: QuoteSummaryResponse = response.json().await?;

        if let Some(error) = data.quote_summary.error {
            return Err(SourceError::Api {
                code: error.code,
                description: error.description,
            });
        }

        let trailing_pe = data
            .quote_summary
            .result
            .and_then(|r| r.into_iter().next())
            .and_then(|r| r.summary_detail)
            .and_then(|d| d.trailing_pe)
            .and_then(|v| v.raw);

        Ok(Fundamentals { trailing_pe })
    }
}
