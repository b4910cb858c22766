//! Screening engine types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-symbol market statistics, one row of the screening input table.
///
/// Rows are independent; the engine never looks across rows and never
/// mutates a snapshot. `volume_ratio` is trusted as computed upstream
/// (`volume_24h / avg_volume_7d`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolSnapshot {
    /// Ticker or crypto pair (e.g. "AAPL", "BTC-USD")
    pub symbol: String,
    /// Latest price in the instrument's quote currency
    pub current_price: Decimal,
    /// Signed percent change over the most recent trading day
    pub price_change_1d: Decimal,
    /// Signed percent change over the trailing 7 trading days
    pub price_change_7d: Decimal,
    /// Most recent period's traded volume
    pub volume_24h: u64,
    /// Trailing 7-day average volume
    pub avg_volume_7d: u64,
    /// `volume_24h / avg_volume_7d`; values > 1 mean above-normal activity
    pub volume_ratio: Decimal,
}

/// Inclusion thresholds for the filter stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningCriteria {
    /// Minimum volume vs 7-day average (2.0 = 200% of normal)
    pub min_volume_ratio: Decimal,
    /// Minimum 1-day price change %
    pub min_price_change_1d: Decimal,
    /// Maximum 1-day price change %
    pub max_price_change_1d: Decimal,
}

impl Default for ScreeningCriteria {
    fn default() -> Self {
        Self {
            min_volume_ratio: rust_decimal_macros::dec!(2.0),
            min_price_change_1d: rust_decimal_macros::dec!(-50.0),
            max_price_change_1d: rust_decimal_macros::dec!(50.0),
        }
    }
}

/// Malformed criteria, caught at the boundary only.
///
/// The filter itself stays total: inverted bounds passed straight in
/// simply match nothing.
#[derive(Debug, Error)]
pub enum CriteriaError {
    /// min 1-day change above max 1-day change
    #[error("inverted price change bounds: min {min} > max {max}")]
    InvertedPriceBounds { min: Decimal, max: Decimal },
    /// Volume ratio threshold below zero
    #[error("negative volume ratio threshold: {0}")]
    NegativeVolumeRatio(Decimal),
}

impl ScreeningCriteria {
    /// Check the criteria for combinations that can never match anything.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if self.min_price_change_1d > self.max_price_change_1d {
            return Err(CriteriaError::InvertedPriceBounds {
                min: self.min_price_change_1d,
                max: self.max_price_change_1d,
            });
        }
        if self.min_volume_ratio < Decimal::ZERO {
            return Err(CriteriaError::NegativeVolumeRatio(self.min_volume_ratio));
        }
        Ok(())
    }
}

/// A snapshot that survived filtering, extended with its ranking score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The underlying market statistics
    #[serde(flatten)]
    pub snapshot: SymbolSnapshot,
    /// 1.5 when the daily and weekly moves agree in sign, else 1.0
    pub trend_consistency: Decimal,
    /// `volume_ratio * |price_change_1d| * trend_consistency`, 2 dp
    pub momentum_score: Decimal,
}

/// Aggregate view over a screening run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub total_found: usize,
    pub avg_volume_ratio: Decimal,
    pub avg_momentum_score: Decimal,
    /// Human-readable bullish/bearish counts, at most two entries
    pub top_categories: Vec<String>,
}

/// Ranked candidates plus their summary, the engine's full output.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenResult {
    pub candidates: Vec<ScoredCandidate>,
    pub summary: ScreeningSummary,
}
