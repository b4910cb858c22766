//! Scoring stage
//!
//! Turns filtered snapshots into ranked candidates. The momentum score
//! rewards a large current-day move on above-normal volume, boosted when
//! the weekly trend agrees with the daily direction (more likely real
//! momentum than noise).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{ScoredCandidate, SymbolSnapshot};

/// Trend multiplier when daily and weekly moves agree in sign.
const TREND_AGREEMENT_BOOST: Decimal = dec!(1.5);
/// Base trend multiplier (disagreement, or a flat day or week).
const TREND_BASE: Decimal = dec!(1.0);

/// Score one snapshot.
///
/// The sign test is a strictly positive product: a zero move on either
/// side yields the base multiplier.
fn score_snapshot(snapshot: SymbolSnapshot) -> ScoredCandidate {
    let trend_consistency = if snapshot.price_change_1d * snapshot.price_change_7d > Decimal::ZERO
    {
        TREND_AGREEMENT_BOOST
    } else {
        TREND_BASE
    };

    let momentum_score =
        (snapshot.volume_ratio * snapshot.price_change_1d.abs() * trend_consistency).round_dp(2);

    ScoredCandidate {
        snapshot,
        trend_consistency,
        momentum_score,
    }
}

/// Score every snapshot and rank descending by momentum score.
///
/// The sort is stable, so rows with equal scores keep their input order.
pub fn score_snapshots(snapshots: Vec<SymbolSnapshot>) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = snapshots.into_iter().map(score_snapshot).collect();
    scored.sort_by(|a, b| b.momentum_score.cmp(&a.momentum_score));
    scored
}
