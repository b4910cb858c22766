//! Filter stage
//!
//! Applies the inclusion predicates over volume ratio and 1-day price
//! change to a snapshot table. Pure: the input is never mutated and no
//! validation happens here (well-formed numeric fields are the upstream
//! provider's contract).

use super::types::{ScreeningCriteria, SymbolSnapshot};

/// Check a single row against the criteria.
///
/// Both predicates are independent and combined with logical AND, so the
/// order of application never changes the result set.
pub fn matches_criteria(snapshot: &SymbolSnapshot, criteria: &ScreeningCriteria) -> bool {
    snapshot.volume_ratio >= criteria.min_volume_ratio
        && snapshot.price_change_1d >= criteria.min_price_change_1d
        && snapshot.price_change_1d <= criteria.max_price_change_1d
}

/// Apply the screening filters, returning the surviving rows.
///
/// An empty input, or criteria matching nothing, yields an empty vector
/// rather than an error.
pub fn filter_snapshots(
    snapshots: &[SymbolSnapshot],
    criteria: &ScreeningCriteria,
) -> Vec<SymbolSnapshot> {
    snapshots
        .iter()
        .filter(|s| matches_criteria(s, criteria))
        .cloned()
        .collect()
}
