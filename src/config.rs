//! Configuration types for movers-screener

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::screener::ScreeningCriteria;
use crate::telemetry::LogFormat;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub symbols: SymbolsConfig,
    pub screening: ScreeningConfig,
    pub telemetry: TelemetryConfig,
    /// Named screening presets, selectable with `screen --scenario`
    #[serde(default)]
    pub scenarios: BTreeMap<String, ScenarioConfig>,
}

/// Data provider selection and tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    #[serde(default)]
    pub fmp_api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

/// Which data source backs the snapshot table
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Deterministic synthetic data for demos
    Mock,
    /// Financial Modeling Prep daily candles
    Fmp,
}

/// The symbol universe to screen
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolsConfig {
    pub stocks: Vec<String>,
    pub crypto: Vec<String>,
}

impl SymbolsConfig {
    /// Full universe, stocks first then crypto pairs.
    pub fn all(&self) -> Vec<String> {
        self.stocks
            .iter()
            .chain(self.crypto.iter())
            .cloned()
            .collect()
    }
}

/// Default screening thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningConfig {
    pub min_volume_ratio: Decimal,
    pub min_price_change_1d: Decimal,
    pub max_price_change_1d: Decimal,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl ScreeningConfig {
    pub fn to_criteria(&self) -> ScreeningCriteria {
        ScreeningCriteria {
            min_volume_ratio: self.min_volume_ratio,
            min_price_change_1d: self.min_price_change_1d,
            max_price_change_1d: self.max_price_change_1d,
        }
    }
}

/// A named screening preset
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub description: String,
    pub min_volume_ratio: Decimal,
    pub min_price_change_1d: Decimal,
    pub max_price_change_1d: Decimal,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl ScenarioConfig {
    pub fn to_criteria(&self) -> ScreeningCriteria {
        ScreeningCriteria {
            min_volume_ratio: self.min_volume_ratio,
            min_price_change_1d: self.min_price_change_1d,
            max_price_change_1d: self.max_price_change_1d,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_cache_ttl_secs() -> u64 {
    300
}
fn default_max_results() -> usize {
    20
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
