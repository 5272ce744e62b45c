//! Trading signals service module.
//!
//! Provides per-bar technical indicator series, the indicator engine that
//! turns raw bars into a snapshot, rule-based scoring, and trade planning.

pub mod engine;
pub mod indicators;
pub mod plan;
pub mod scoring;

pub use engine::{compute, IndicatorFrame};
pub use plan::build_plan;
pub use scoring::score;

use crate::types::PriceBar;

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Minimum number of bars required before the first value is defined.
    fn min_periods(&self) -> usize;

    /// Calculate one value per bar, `None` during the warm-up prefix.
    fn series(&self, bars: &[PriceBar]) -> Vec<Option<f64>>;
}
