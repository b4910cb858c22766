//! Display formatting boundary
//!
//! Maps ranked candidates to a presentation-ready table. Pure and
//! stateless; rendering (column widths, output target) stays in the CLI.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::screener::ScoredCandidate;

/// Display labels, in column order.
pub const COLUMN_LABELS: [&str; 6] = [
    "Symbol",
    "Price",
    "1D Change",
    "7D Change",
    "Volume Spike",
    "Momentum Score",
];

/// One presentation-ready row.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub symbol: String,
    pub price: String,
    pub change_1d: String,
    pub change_7d: String,
    pub volume_spike: String,
    pub momentum_score: String,
}

impl DisplayRow {
    /// Cells in the same order as [`COLUMN_LABELS`].
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.symbol,
            &self.price,
            &self.change_1d,
            &self.change_7d,
            &self.volume_spike,
            &self.momentum_score,
        ]
    }
}

/// Format candidates for display, preserving their ranked order.
pub fn format_for_display(candidates: &[ScoredCandidate]) -> Vec<DisplayRow> {
    candidates
        .iter()
        .map(|c| DisplayRow {
            symbol: c.snapshot.symbol.clone(),
            price: format_currency(c.snapshot.current_price),
            change_1d: format_change(c.snapshot.price_change_1d),
            change_7d: format_change(c.snapshot.price_change_7d),
            volume_spike: format!("{:.1}x", c.snapshot.volume_ratio.round_dp(1)),
            momentum_score: format!("{:.2}", c.momentum_score.round_dp(2)),
        })
        .collect()
}

/// `$1,234.56` style, always two decimals.
fn format_currency(price: Decimal) -> String {
    let text = format!("{:.2}", price.round_dp(2));
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };
    format!("{sign}${}.{fraction}", group_thousands(digits))
}

/// Signed one-decimal percent with a direction glyph. A flat value gets
/// the down glyph, matching the strictly-positive upstream test.
fn format_change(change: Decimal) -> String {
    let glyph = if change > Decimal::ZERO { "📈" } else { "📉" };
    let sign = if change.is_sign_negative() { "" } else { "+" };
    format!("{glyph} {sign}{:.1}%", change.round_dp(1))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
