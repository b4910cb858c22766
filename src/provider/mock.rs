//! Mock data provider
//!
//! Deterministic synthetic market data for demos and tests. Values are
//! derived from a per-symbol hash rather than a random source, so repeated
//! runs produce the same table.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{MarketDataProvider, ProviderError, SymbolMatch};
use crate::screener::SymbolSnapshot;

/// Mock provider over a fixed symbol universe.
pub struct MockProvider {
    stocks: Vec<String>,
    crypto: Vec<String>,
}

impl MockProvider {
    pub fn new(stocks: Vec<String>, crypto: Vec<String>) -> Self {
        Self { stocks, crypto }
    }

    fn universe(&self) -> impl Iterator<Item = &String> {
        self.stocks.iter().chain(self.crypto.iter())
    }

    fn synthesize(symbol: &str) -> SymbolSnapshot {
        let seed = fnv1a(symbol.as_bytes());

        // Crypto pairs span a much wider price range than equities
        let base_price = if symbol.ends_with("-USD") {
            pick_in_range(mix(seed, 1), dec!(0.01), dec!(100000))
        } else {
            pick_in_range(mix(seed, 1), dec!(10), dec!(1000))
        };

        let price_change_1d = pick_in_range(mix(seed, 2), dec!(-15), dec!(15));
        let price_change_7d = price_change_1d + pick_in_range(mix(seed, 3), dec!(-10), dec!(10));

        let base_volume = pick_in_range(mix(seed, 4), dec!(1000000), dec!(100000000));
        let multiplier = volume_multiplier(mix(seed, 5));
        let current_volume = base_volume * multiplier;

        let volume_24h = decimal_to_u64(current_volume);
        let avg_volume_7d = decimal_to_u64(base_volume);

        SymbolSnapshot {
            symbol: symbol.to_string(),
            current_price: base_price.round_dp(2),
            price_change_1d: price_change_1d.round_dp(2),
            price_change_7d: price_change_7d.round_dp(2),
            volume_24h,
            avg_volume_7d,
            volume_ratio: (current_volume / base_volume).round_dp(2),
        }
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn get_market_data(
        &self,
        symbols: &[String],
    ) -> Result<Vec<SymbolSnapshot>, ProviderError> {
        if symbols.is_empty() {
            return Err(ProviderError::NoData);
        }
        tracing::debug!(count = symbols.len(), "Generating mock market data");
        Ok(symbols.iter().map(|s| Self::synthesize(s)).collect())
    }

    fn search_symbols(&self, query: &str, limit: usize) -> Vec<SymbolMatch> {
        let query = query.to_uppercase();
        self.universe()
            .filter(|s| s.to_uppercase().contains(&query))
            .take(limit)
            .map(|s| SymbolMatch {
                symbol: s.clone(),
                name: format!("{s} (mock)"),
            })
            .collect()
    }

    fn top_symbols(&self, limit: usize) -> Vec<String> {
        self.universe().take(limit).cloned().collect()
    }
}

/// FNV-1a over the symbol name, the stable seed for all derived fields.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// splitmix64 finalizer, one independent stream per field index.
fn mix(seed: u64, index: u64) -> u64 {
    let mut z = seed.wrapping_add(index.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Map a hash onto `[low, high)` with 4 decimal places of resolution.
fn pick_in_range(hash: u64, low: Decimal, high: Decimal) -> Decimal {
    let fraction = Decimal::from(hash % 10_000) / dec!(10000);
    low + (high - low) * fraction
}

/// Volume spike multiplier, weighted toward normal activity the way real
/// markets are: most symbols trade near their average.
fn volume_multiplier(hash: u64) -> Decimal {
    match hash % 100 {
        0..=59 => dec!(1),
        60..=79 => dec!(1.5),
        80..=89 => dec!(2),
        90..=96 => dec!(3),
        _ => dec!(5),
    }
}

fn decimal_to_u64(value: Decimal) -> u64 {
    use rust_decimal::prelude::ToPrimitive;
    value.trunc().to_u64().unwrap_or(0)
}
