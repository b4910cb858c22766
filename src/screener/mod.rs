//! Screening engine
//!
//! The load-bearing core: a pure filter-and-rank pipeline that turns a
//! flat table of per-symbol market statistics into a ranked, explainable
//! candidate list. Stateless and synchronous; every call re-derives its
//! output entirely from the snapshot table it is given, so concurrent
//! callers with different inputs need no coordination.

mod filter;
mod score;
mod summary;
mod types;

pub use filter::{filter_snapshots, matches_criteria};
pub use score::score_snapshots;
pub use summary::summarize;
pub use types::{
    CriteriaError, ScoredCandidate, ScreenResult, ScreeningCriteria, ScreeningSummary,
    SymbolSnapshot,
};

/// Run the full pipeline: filter, score, summarize.
pub fn screen(snapshots: &[SymbolSnapshot], criteria: &ScreeningCriteria) -> ScreenResult {
    let surviving = filter_snapshots(snapshots, criteria);
    let candidates = score_snapshots(surviving);
    let summary = summarize(&candidates);
    ScreenResult {
        candidates,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot(symbol: &str, ratio: &str, change_1d: &str, change_7d: &str) -> SymbolSnapshot {
        SymbolSnapshot {
            symbol: symbol.to_string(),
            current_price: dec!(100),
            price_change_1d: change_1d.parse().unwrap(),
            price_change_7d: change_7d.parse().unwrap(),
            volume_24h: 2_000_000,
            avg_volume_7d: 1_000_000,
            volume_ratio: ratio.parse().unwrap(),
        }
    }

    #[test]
    fn test_screen_pipeline() {
        let rows = vec![
            snapshot("FILTERED", "1.0", "5.0", "10.0"),
            snapshot("WINNER", "3.0", "5.0", "10.0"),
            snapshot("RUNNER", "2.5", "-4.0", "2.0"),
        ];
        let result = screen(&rows, &ScreeningCriteria::default());

        assert_eq!(result.candidates.len(), 2);
        assert_eq!(result.candidates[0].snapshot.symbol, "WINNER");
        assert_eq!(result.candidates[0].momentum_score, dec!(22.5));
        assert_eq!(result.candidates[1].snapshot.symbol, "RUNNER");
        assert_eq!(result.candidates[1].momentum_score, dec!(10.0));

        assert_eq!(result.summary.total_found, 2);
        assert_eq!(
            result.summary.top_categories,
            vec![
                "Bullish Momentum: 1 assets".to_string(),
                "Bearish Momentum: 1 assets".to_string(),
            ]
        );
    }

    #[test]
    fn test_screen_nothing_matches() {
        let rows = vec![snapshot("QUIET", "1.0", "0.5", "0.2")];
        let criteria = ScreeningCriteria {
            min_volume_ratio: dec!(5.0),
            ..Default::default()
        };
        let result = screen(&rows, &criteria);
        assert!(result.candidates.is_empty());
        assert_eq!(result.summary.total_found, 0);
    }
}
