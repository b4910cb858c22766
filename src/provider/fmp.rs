//! Financial Modeling Prep data provider
//!
//! Fetches daily candles per symbol and derives the screening snapshot
//! (1-day and 7-day changes, volume ratio vs the 7-day average). Symbols
//! are fetched in parallel and partial failures are tolerated: a symbol
//! that errors is logged and skipped, and only an entirely empty batch
//! surfaces as an error.

use futures_util::future::join_all;
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::time::Duration;

use async_trait::async_trait;

use super::{MarketDataProvider, ProviderError, SymbolMatch};
use crate::screener::SymbolSnapshot;

/// FMP API base URL
pub const FMP_API_URL: &str = "https://financialmodelingprep.com";

/// Daily candles to request; the snapshot needs at least 7.
const HISTORY_DAYS: usize = 10;

/// One daily candle from the historical endpoint, oldest-last on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyCandle {
    pub date: String,
    pub close: Decimal,
    pub volume: Decimal,
}

#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    #[serde(default)]
    historical: Vec<DailyCandle>,
}

/// Client for FMP daily price history.
pub struct FmpProvider {
    api_key: String,
    base_url: String,
    stocks: Vec<String>,
    crypto: Vec<String>,
    client: Client,
}

impl FmpProvider {
    pub fn new(
        api_key: String,
        stocks: Vec<String>,
        crypto: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self::with_base_url(api_key, stocks, crypto, timeout, FMP_API_URL.to_string())
    }

    /// Point the client at a different base URL (used by tests).
    pub fn with_base_url(
        api_key: String,
        stocks: Vec<String>,
        crypto: Vec<String>,
        timeout: Duration,
        base_url: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            api_key,
            base_url,
            stocks,
            crypto,
            client,
        }
    }

    fn universe(&self) -> impl Iterator<Item = &String> {
        self.stocks.iter().chain(self.crypto.iter())
    }

    async fn fetch_symbol(&self, symbol: &str) -> Result<SymbolSnapshot, ProviderError> {
        let url = format!(
            "{}/api/v3/historical-price-full/{}",
            self.base_url,
            api_symbol(symbol)
        );

        tracing::debug!(symbol = %symbol, url = %url, "Fetching daily candles");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("timeseries", HISTORY_DAYS.to_string()),
                ("apikey", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let payload: HistoricalResponse = response.json().await?;

        // FMP returns newest-first; derivation wants chronological order
        let mut candles = payload.historical;
        candles.reverse();

        derive_snapshot(symbol, &candles)
    }
}

#[async_trait]
impl MarketDataProvider for FmpProvider {
    async fn get_market_data(
        &self,
        symbols: &[String],
    ) -> Result<Vec<SymbolSnapshot>, ProviderError> {
        tracing::info!(count = symbols.len(), "Fetching market data from FMP");

        let fetches = symbols.iter().map(|s| self.fetch_symbol(s));
        let results = join_all(fetches).await;

        let mut rows = Vec::with_capacity(symbols.len());
        let mut failed = 0usize;
        for (symbol, result) in symbols.iter().zip(results) {
            match result {
                Ok(snapshot) => rows.push(snapshot),
                Err(e) => {
                    failed += 1;
                    tracing::warn!(symbol = %symbol, error = %e, "Skipping symbol");
                }
            }
        }

        tracing::info!(
            fetched = rows.len(),
            failed,
            total = symbols.len(),
            "Market data fetch complete"
        );

        if rows.is_empty() {
            return Err(ProviderError::NoData);
        }
        Ok(rows)
    }

    fn search_symbols(&self, query: &str, limit: usize) -> Vec<SymbolMatch> {
        let query = query.to_uppercase();
        self.universe()
            .filter(|s| s.to_uppercase().contains(&query))
            .take(limit)
            .map(|s| SymbolMatch {
                symbol: s.clone(),
                name: format!("{s} (FMP)"),
            })
            .collect()
    }

    fn top_symbols(&self, limit: usize) -> Vec<String> {
        self.universe().take(limit).cloned().collect()
    }
}

/// Crypto pairs drop the dash on FMP ("BTC-USD" -> "BTCUSD").
fn api_symbol(symbol: &str) -> String {
    if symbol.ends_with("-USD") {
        symbol.replace('-', "")
    } else {
        symbol.to_string()
    }
}

/// Derive a snapshot row from chronological daily candles.
pub fn derive_snapshot(
    symbol: &str,
    candles: &[DailyCandle],
) -> Result<SymbolSnapshot, ProviderError> {
    if candles.len() < 7 {
        return Err(ProviderError::InsufficientHistory {
            symbol: symbol.to_string(),
            needed: 7,
            got: candles.len(),
        });
    }

    let latest = &candles[candles.len() - 1];
    let previous = &candles[candles.len() - 2];
    let week_ago = &candles[candles.len() - 7];

    // Halted or newly listed symbols can report zero closes or a week of
    // zero volume; reject those rows instead of dividing by zero
    if previous.close.is_zero() || week_ago.close.is_zero() {
        return Err(ProviderError::DegenerateHistory {
            symbol: symbol.to_string(),
            detail: "zero reference close",
        });
    }

    let price_change_1d = (latest.close - previous.close) / previous.close * dec!(100);
    let price_change_7d = (latest.close - week_ago.close) / week_ago.close * dec!(100);

    let last_week = &candles[candles.len() - 7..];
    let volume_sum: Decimal = last_week.iter().map(|c| c.volume).sum();
    let avg_volume_7d = volume_sum / Decimal::from(last_week.len());
    if avg_volume_7d.is_zero() {
        return Err(ProviderError::DegenerateHistory {
            symbol: symbol.to_string(),
            detail: "no trading volume in the last 7 days",
        });
    }
    let volume_ratio = latest.volume / avg_volume_7d;

    Ok(SymbolSnapshot {
        symbol: symbol.to_string(),
        current_price: latest.close.round_dp(2),
        price_change_1d: price_change_1d.round_dp(2),
        price_change_7d: price_change_7d.round_dp(2),
        volume_24h: latest.volume.trunc().to_u64().unwrap_or(0),
        avg_volume_7d: avg_volume_7d.trunc().to_u64().unwrap_or(0),
        volume_ratio: volume_ratio.round_dp(2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(day: u32, close: Decimal, volume: Decimal) -> DailyCandle {
        DailyCandle {
            date: format!("2026-08-{day:02}"),
            close,
            volume,
        }
    }

    #[test]
    fn test_derive_snapshot() {
        // Flat closes except a 10% pop on the last day; last-day volume
        // is 4x the other six days.
        let mut candles: Vec<DailyCandle> = (1..=6)
            .map(|d| candle(d, dec!(100), dec!(1000000)))
            .collect();
        candles.push(candle(7, dec!(110), dec!(4000000)));

        let snapshot = derive_snapshot("AAPL", &candles).unwrap();
        assert_eq!(snapshot.current_price, dec!(110));
        assert_eq!(snapshot.price_change_1d, dec!(10.00));
        assert_eq!(snapshot.price_change_7d, dec!(10.00));
        // avg = (6*1M + 4M) / 7 ≈ 1,428,571; ratio = 4M / avg = 2.8
        assert_eq!(snapshot.volume_ratio, dec!(2.80));
        assert_eq!(snapshot.avg_volume_7d, 1_428_571);
        assert_eq!(snapshot.volume_24h, 4_000_000);
    }

    #[test]
    fn test_derive_snapshot_uses_trailing_seven_days() {
        // Ten candles; only the last seven should matter for the average
        let mut candles: Vec<DailyCandle> = (1..=3)
            .map(|d| candle(d, dec!(50), dec!(999999999)))
            .collect();
        candles.extend((4..=10).map(|d| candle(d, dec!(100), dec!(2000000))));

        let snapshot = derive_snapshot("MSFT", &candles).unwrap();
        assert_eq!(snapshot.volume_ratio, dec!(1.00));
        assert_eq!(snapshot.avg_volume_7d, 2_000_000);
        assert_eq!(snapshot.price_change_7d, dec!(0.00));
    }

    #[test]
    fn test_derive_snapshot_insufficient_history() {
        let candles: Vec<DailyCandle> = (1..=5)
            .map(|d| candle(d, dec!(100), dec!(1000000)))
            .collect();
        let result = derive_snapshot("NEWIPO", &candles);
        assert!(matches!(
            result,
            Err(ProviderError::InsufficientHistory { needed: 7, got: 5, .. })
        ));
    }

    #[test]
    fn test_derive_snapshot_single_candle() {
        let candles = vec![candle(1, dec!(100), dec!(1000000))];
        let result = derive_snapshot("X", &candles);
        assert!(matches!(
            result,
            Err(ProviderError::InsufficientHistory { needed: 7, got: 1, .. })
        ));
    }

    #[test]
    fn test_derive_snapshot_zero_volume_week() {
        // A halted symbol: closes present, no trading at all
        let candles: Vec<DailyCandle> =
            (1..=7).map(|d| candle(d, dec!(100), dec!(0))).collect();
        let result = derive_snapshot("HALTED", &candles);
        assert!(matches!(
            result,
            Err(ProviderError::DegenerateHistory {
                detail: "no trading volume in the last 7 days",
                ..
            })
        ));
    }

    #[test]
    fn test_derive_snapshot_zero_reference_close() {
        let mut candles: Vec<DailyCandle> =
            (1..=6).map(|d| candle(d, dec!(0), dec!(1000000))).collect();
        candles.push(candle(7, dec!(100), dec!(1000000)));
        let result = derive_snapshot("LISTED", &candles);
        assert!(matches!(
            result,
            Err(ProviderError::DegenerateHistory {
                detail: "zero reference close",
                ..
            })
        ));
    }

    #[test]
    fn test_api_symbol_mapping() {
        assert_eq!(api_symbol("BTC-USD"), "BTCUSD");
        assert_eq!(api_symbol("AAPL"), "AAPL");
    }

    /// Minimal HTTP stub: serves a healthy candle history for GOOD and a
    /// 404 for everything else.
    async fn spawn_stub_server() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 8192];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).to_string();
                    let (status, body) = if request.contains("/historical-price-full/GOOD") {
                        ("200 OK", good_history_json())
                    } else {
                        ("404 Not Found", r#"{"error":"symbol not found"}"#.to_string())
                    };
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
        format!("http://{addr}")
    }

    /// Seven candles newest-first: a 5% pop on double volume yesterday.
    fn good_history_json() -> String {
        let mut entries =
            vec![r#"{"date":"2026-08-21","close":105.0,"volume":2000000}"#.to_string()];
        for day in (15..=20).rev() {
            entries.push(format!(
                r#"{{"date":"2026-08-{day}","close":100.0,"volume":1000000}}"#
            ));
        }
        format!(r#"{{"symbol":"GOOD","historical":[{}]}}"#, entries.join(","))
    }

    fn stub_provider(base_url: String) -> FmpProvider {
        FmpProvider::with_base_url(
            "test-key".to_string(),
            vec!["GOOD".to_string(), "MISSING".to_string()],
            vec![],
            Duration::from_secs(5),
            base_url,
        )
    }

    #[tokio::test]
    async fn test_get_market_data_skips_failed_symbols() {
        let base_url = spawn_stub_server().await;
        let provider = stub_provider(base_url);

        let rows = provider
            .get_market_data(&["GOOD".to_string(), "MISSING".to_string()])
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "GOOD");
        assert_eq!(rows[0].price_change_1d, dec!(5.00));
        assert_eq!(rows[0].volume_ratio, dec!(1.75));
    }

    #[tokio::test]
    async fn test_get_market_data_all_failed_is_no_data() {
        let base_url = spawn_stub_server().await;
        let provider = stub_provider(base_url);

        let result = provider
            .get_market_data(&["MISSING".to_string(), "GONE".to_string()])
            .await;

        assert!(matches!(result, Err(ProviderError::NoData)));
    }

    #[test]
    fn test_historical_response_parses() {
        let json = r#"{
            "symbol": "AAPL",
            "historical": [
                {"date": "2026-08-21", "close": 182.5, "volume": 51234567},
                {"date": "2026-08-20", "close": 180.0, "volume": 48000000}
            ]
        }"#;
        let parsed: HistoricalResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.historical.len(), 2);
        assert_eq!(parsed.historical[0].close, dec!(182.5));
    }
}
