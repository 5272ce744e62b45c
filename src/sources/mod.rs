//! Market-data providers.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Fundamentals, RawSeries};

/// Errors raised while talking to a market-data provider.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: HTTP {0}")]
    Status(u16),

    #[error("provider error: {code} - {description}")]
    Api { code: String, description: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Supplier of historical bars and fundamentals for a symbol.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Daily bars over the configured trailing window. An unknown symbol
    /// yields an empty series rather than an error.
    async fn fetch_history(&self, symbol: &str) -> Result<RawSeries, SourceError>;

    /// Fundamentals record for the symbol.
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, SourceError>;
}
