//! CLI interface for movers-screener
//!
//! Provides subcommands for:
//! - `screen`: Run the screening pipeline over the configured universe
//! - `search`: Look up symbols in the configured universe
//! - `scenarios`: List configured screening presets
//! - `config`: Show effective configuration

mod screen;
mod search;

pub use screen::{OutputFormat, ScreenArgs};
pub use search::SearchArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "movers-screener")]
#[command(about = "Volume-spike and momentum screener for equities and crypto")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Screen the universe for potential movers
    Screen(ScreenArgs),
    /// Search for symbols matching a query
    Search(SearchArgs),
    /// List configured screening presets
    Scenarios,
    /// Show effective configuration
    Config,
}
