//! Market data acquisition
//!
//! Providers materialize the snapshot table the screening engine consumes.
//! The trait seam allows swapping data sources (mock for demos, FMP for
//! real data) without touching the engine.

mod cache;
mod fmp;
mod mock;

pub use cache::CachedProvider;
pub use fmp::{FmpProvider, FMP_API_URL};
pub use mock::MockProvider;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::{Config, ProviderKind};
use crate::screener::SymbolSnapshot;

/// Acquisition errors, surfaced to the caller as distinguishable
/// conditions rather than masked inside the snapshot table.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport failure
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success response from the data API
    #[error("data API error: {status} - {body}")]
    Api { status: u16, body: String },
    /// Fewer daily candles than the 7-day window needs
    #[error("insufficient history for {symbol}: need at least {needed} days, got {got}")]
    InsufficientHistory {
        symbol: String,
        needed: usize,
        got: usize,
    },
    /// History present but unusable: a zero reference close or a zero
    /// 7-day average volume leaves the derived changes and ratio undefined
    /// (halted or newly listed symbols)
    #[error("degenerate history for {symbol}: {detail}")]
    DegenerateHistory {
        symbol: String,
        detail: &'static str,
    },
    /// Every symbol in the batch failed or returned nothing
    #[error("no market data available for any requested symbol")]
    NoData,
}

/// A symbol search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
}

/// Trait for market data providers.
///
/// `get_market_data` must tolerate partial failures: symbols that error
/// or return no data are skipped, and only an empty batch is an error.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch one snapshot row per symbol that could be resolved.
    async fn get_market_data(
        &self,
        symbols: &[String],
    ) -> Result<Vec<SymbolSnapshot>, ProviderError>;

    /// Search the known universe for symbols matching a query.
    fn search_symbols(&self, query: &str, limit: usize) -> Vec<SymbolMatch>;

    /// The configured universe, largest first, capped at `limit`.
    fn top_symbols(&self, limit: usize) -> Vec<String>;
}

/// Build the configured provider, wrapped in the snapshot cache.
pub fn create_provider(config: &Config) -> CachedProvider {
    let inner: Box<dyn MarketDataProvider> = match config.provider.kind {
        ProviderKind::Mock => Box::new(MockProvider::new(
            config.symbols.stocks.clone(),
            config.symbols.crypto.clone(),
        )),
        ProviderKind::Fmp => Box::new(FmpProvider::new(
            config.provider.fmp_api_key.clone(),
            config.symbols.stocks.clone(),
            config.symbols.crypto.clone(),
            std::time::Duration::from_secs(config.provider.timeout_secs),
        )),
    };
    CachedProvider::new(inner, config.provider.cache_ttl_secs)
}
