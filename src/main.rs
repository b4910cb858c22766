use clap::Parser;
use movers_screener::cli::{Cli, Commands};
use movers_screener::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    movers_screener::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Screen(args) => {
            tracing::info!("Starting screening run");
            args.execute(&config).await?;
        }
        Commands::Search(args) => {
            args.execute(&config)?;
        }
        Commands::Scenarios => {
            if config.scenarios.is_empty() {
                println!("No scenarios configured");
            }
            for (name, scenario) in &config.scenarios {
                println!("{name}: {}", scenario.description);
                println!(
                    "  volume ratio >= {}, 1d change in [{}, {}], top {}",
                    scenario.min_volume_ratio,
                    scenario.min_price_change_1d,
                    scenario.max_price_change_1d,
                    scenario.max_results
                );
            }
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Provider: {:?}", config.provider.kind);
            println!(
                "  Universe: {} stocks, {} crypto pairs",
                config.symbols.stocks.len(),
                config.symbols.crypto.len()
            );
            println!(
                "  Screening: volume ratio >= {}, 1d change in [{}, {}]",
                config.screening.min_volume_ratio,
                config.screening.min_price_change_1d,
                config.screening.max_price_change_1d
            );
            println!("  Cache TTL: {}s", config.provider.cache_ttl_secs);
        }
    }

    Ok(())
}
