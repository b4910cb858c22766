//! Snapshot caching
//!
//! Time-boxed cache over a provider's snapshot table, so repeated screens
//! within the validity window reuse the last fetch instead of hammering
//! the data API. Caching lives here in the acquisition layer; the engine
//! itself stays stateless.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::{MarketDataProvider, ProviderError, SymbolMatch};
use crate::screener::SymbolSnapshot;

struct CacheEntry {
    symbols: Vec<String>,
    fetched_at: DateTime<Utc>,
    rows: Vec<SymbolSnapshot>,
}

/// TTL cache wrapper around any market data provider.
pub struct CachedProvider {
    inner: Box<dyn MarketDataProvider>,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl CachedProvider {
    pub fn new(inner: Box<dyn MarketDataProvider>, ttl_secs: u64) -> Self {
        Self {
            inner,
            ttl: Duration::seconds(ttl_secs as i64),
            entry: RwLock::new(None),
        }
    }

    /// Drop any cached snapshot, forcing the next call to refetch.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }
}

#[async_trait]
impl MarketDataProvider for CachedProvider {
    async fn get_market_data(
        &self,
        symbols: &[String],
    ) -> Result<Vec<SymbolSnapshot>, ProviderError> {
        {
            let guard = self.entry.read().await;
            if let Some(entry) = guard.as_ref() {
                let fresh = Utc::now() - entry.fetched_at < self.ttl;
                if fresh && entry.symbols == symbols {
                    tracing::debug!(rows = entry.rows.len(), "Serving snapshot from cache");
                    return Ok(entry.rows.clone());
                }
            }
        }

        let rows = self.inner.get_market_data(symbols).await?;
        let mut guard = self.entry.write().await;
        *guard = Some(CacheEntry {
            symbols: symbols.to_vec(),
            fetched_at: Utc::now(),
            rows: rows.clone(),
        });
        Ok(rows)
    }

    fn search_symbols(&self, query: &str, limit: usize) -> Vec<SymbolMatch> {
        self.inner.search_symbols(query, limit)
    }

    fn top_symbols(&self, limit: usize) -> Vec<String> {
        self.inner.top_symbols(limit)
    }
}
