//! Search command implementation

use clap::Args;

use crate::config::Config;
use crate::provider::{create_provider, MarketDataProvider};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Query to match against the configured universe
    pub query: String,

    /// Maximum number of matches to show
    #[arg(long, default_value_t = 50)]
    pub limit: usize,
}

impl SearchArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let provider = create_provider(config);
        let matches = provider.search_symbols(&self.query, self.limit);

        if matches.is_empty() {
            println!("No symbols matching '{}'", self.query);
            return Ok(());
        }

        for m in matches {
            println!("{:<10}  {}", m.symbol, m.name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_executes() {
        let config: Config =
            toml::from_str(include_str!("../../config.toml.example")).unwrap();
        let args = SearchArgs {
            query: "BTC".to_string(),
            limit: 10,
        };
        args.execute(&config).unwrap();
    }
}
