//! Summary aggregator
//!
//! Collapses a ranked candidate list into counts and averages for the
//! headline view above the results table.

use rust_decimal::Decimal;

use super::types::{ScoredCandidate, ScreeningSummary};

/// Aggregate scored candidates into a screening summary.
///
/// Rows with a flat day (`price_change_1d == 0`) count toward
/// `total_found` but toward neither the bullish nor the bearish bucket.
pub fn summarize(scored: &[ScoredCandidate]) -> ScreeningSummary {
    if scored.is_empty() {
        return ScreeningSummary {
            total_found: 0,
            avg_volume_ratio: Decimal::ZERO,
            avg_momentum_score: Decimal::ZERO,
            top_categories: Vec::new(),
        };
    }

    let count = Decimal::from(scored.len());
    let ratio_sum: Decimal = scored.iter().map(|c| c.snapshot.volume_ratio).sum();
    let score_sum: Decimal = scored.iter().map(|c| c.momentum_score).sum();

    let bullish = scored
        .iter()
        .filter(|c| c.snapshot.price_change_1d > Decimal::ZERO)
        .count();
    let bearish = scored
        .iter()
        .filter(|c| c.snapshot.price_change_1d < Decimal::ZERO)
        .count();

    let mut top_categories = Vec::new();
    if bullish > 0 {
        top_categories.push(format!("Bullish Momentum: {bullish} assets"));
    }
    if bearish > 0 {
        top_categories.push(format!("Bearish Momentum: {bearish} assets"));
    }

    ScreeningSummary {
        total_found: scored.len(),
        avg_volume_ratio: (ratio_sum / count).round_dp(2),
        avg_momentum_score: (score_sum / count).round_dp(2),
        top_categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screener::types::SymbolSnapshot;
    use rust_decimal_macros::dec;

    fn candidate(
        symbol: &str,
        volume_ratio: Decimal,
        price_change_1d: Decimal,
        momentum_score: Decimal,
    ) -> ScoredCandidate {
        ScoredCandidate {
            snapshot: SymbolSnapshot {
                symbol: symbol.to_string(),
                current_price: dec!(50),
                price_change_1d,
                price_change_7d: dec!(0),
                volume_24h: 2_000_000,
                avg_volume_7d: 1_000_000,
                volume_ratio,
            },
            trend_consistency: dec!(1.0),
            momentum_score,
        }
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_found, 0);
        assert_eq!(summary.avg_volume_ratio, Decimal::ZERO);
        assert_eq!(summary.avg_momentum_score, Decimal::ZERO);
        assert!(summary.top_categories.is_empty());
    }

    #[test]
    fn test_summarize_bullish_and_bearish() {
        let scored = vec![
            candidate("UP", dec!(3.0), dec!(5.0), dec!(15.0)),
            candidate("DOWN", dec!(2.0), dec!(-3.0), dec!(6.0)),
        ];
        let summary = summarize(&scored);
        assert_eq!(summary.total_found, 2);
        assert_eq!(summary.avg_volume_ratio, dec!(2.5));
        assert_eq!(summary.avg_momentum_score, dec!(10.5));
        assert_eq!(
            summary.top_categories,
            vec![
                "Bullish Momentum: 1 assets".to_string(),
                "Bearish Momentum: 1 assets".to_string(),
            ]
        );
    }

    #[test]
    fn test_summarize_only_bullish() {
        let scored = vec![
            candidate("A", dec!(3.0), dec!(5.0), dec!(15.0)),
            candidate("B", dec!(3.0), dec!(1.0), dec!(3.0)),
        ];
        let summary = summarize(&scored);
        assert_eq!(
            summary.top_categories,
            vec!["Bullish Momentum: 2 assets".to_string()]
        );
    }

    #[test]
    fn test_summarize_flat_day_in_neither_bucket() {
        let scored = vec![
            candidate("FLAT", dec!(4.0), dec!(0), dec!(0)),
            candidate("UP", dec!(2.0), dec!(1.0), dec!(2.0)),
        ];
        let summary = summarize(&scored);
        assert_eq!(summary.total_found, 2);
        assert_eq!(
            summary.top_categories,
            vec!["Bullish Momentum: 1 assets".to_string()]
        );
    }

    #[test]
    fn test_summarize_averages_round_to_two_decimals() {
        let scored = vec![
            candidate("A", dec!(1.0), dec!(1.0), dec!(1.0)),
            candidate("B", dec!(2.0), dec!(1.0), dec!(1.0)),
            candidate("C", dec!(2.0), dec!(1.0), dec!(1.0)),
        ];
        let summary = summarize(&scored);
        // 5/3 = 1.666... -> 1.67
        assert_eq!(summary.avg_volume_ratio, dec!(1.67));
    }
}
