//! Screen command implementation

use anyhow::Context;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use crate::config::Config;
use crate::display::{format_for_display, COLUMN_LABELS};
use crate::provider::{create_provider, MarketDataProvider};
use crate::screener::{screen, ScreenResult, ScreeningCriteria};

/// Output format for screening results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table plus summary
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Named preset from the [scenarios] config section
    #[arg(long)]
    pub scenario: Option<String>,

    /// Minimum volume vs 7-day average (2.0 = 200% of normal)
    #[arg(long)]
    pub min_volume_ratio: Option<Decimal>,

    /// Minimum 1-day price change %
    #[arg(long)]
    pub min_change: Option<Decimal>,

    /// Maximum 1-day price change %
    #[arg(long)]
    pub max_change: Option<Decimal>,

    /// Maximum number of candidates to show
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ScreenArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (criteria, max_results) = self.resolve_criteria(config)?;
        criteria.validate().context("invalid screening criteria")?;

        let provider = create_provider(config);
        let symbols = config.symbols.all();
        let snapshots = provider
            .get_market_data(&symbols)
            .await
            .context("market data fetch failed")?;

        tracing::info!(
            snapshots = snapshots.len(),
            min_volume_ratio = %criteria.min_volume_ratio,
            "Running screen"
        );

        let mut result = screen(&snapshots, &criteria);
        result.candidates.truncate(max_results);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Table => render_table(&result),
        }
        Ok(())
    }

    /// Resolve effective criteria: config defaults, then the chosen
    /// scenario, then individual flag overrides.
    fn resolve_criteria(&self, config: &Config) -> anyhow::Result<(ScreeningCriteria, usize)> {
        let (mut criteria, mut max_results) = match &self.scenario {
            Some(name) => {
                let scenario = config
                    .scenarios
                    .get(name)
                    .with_context(|| format!("unknown scenario '{name}'"))?;
                (scenario.to_criteria(), scenario.max_results)
            }
            None => (config.screening.to_criteria(), config.screening.max_results),
        };

        if let Some(ratio) = self.min_volume_ratio {
            criteria.min_volume_ratio = ratio;
        }
        if let Some(min) = self.min_change {
            criteria.min_price_change_1d = min;
        }
        if let Some(max) = self.max_change {
            criteria.max_price_change_1d = max;
        }
        if let Some(limit) = self.limit {
            max_results = limit;
        }

        Ok((criteria, max_results))
    }
}

fn render_table(result: &ScreenResult) {
    let summary = &result.summary;
    println!("Found {} candidates", summary.total_found);
    if summary.total_found == 0 {
        return;
    }

    println!(
        "Avg volume ratio: {}x   Avg momentum score: {}",
        summary.avg_volume_ratio, summary.avg_momentum_score
    );
    for category in &summary.top_categories {
        println!("{category}");
    }
    println!();

    let rows = format_for_display(&result.candidates);

    // Column widths from the widest cell, labels included
    let mut widths: Vec<usize> = COLUMN_LABELS.iter().map(|l| l.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.cells().iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let header: Vec<String> = COLUMN_LABELS
        .iter()
        .zip(widths.iter().copied())
        .map(|(label, w)| format!("{label:<w$}"))
        .collect();
    println!("{}", header.join("  "));

    for row in &rows {
        let line: Vec<String> = row
            .cells()
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        println!("{}", line.join("  "));
    }
}
