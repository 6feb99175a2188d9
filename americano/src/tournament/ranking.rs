//! Live leaderboard derived from the roster and the score ledger.
//!
//! The ranking is never stored; it is recomputed from `(roster, ledger)` on
//! every read so it cannot go stale.

use serde::{Deserialize, Serialize};

use super::models::{CompetitorSlot, Points, ScoreLedger};
use crate::schedule::SlotIndex;

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based position on the leaderboard.
    pub position: usize,
    pub label: String,
    pub score: Points,
    /// Original roster slot, used only to break ties.
    pub slot: SlotIndex,
}

/// Rank every roster slot by score, highest first.
///
/// Equal scores keep roster order (lower slot first). A slot missing from the
/// ledger counts as zero.
pub fn rank(roster: &[CompetitorSlot], ledger: &ScoreLedger) -> Vec<RankingEntry> {
    let mut rows: Vec<(SlotIndex, &str, Points)> = roster
        .iter()
        .map(|slot| {
            (
                slot.index,
                slot.label.as_str(),
                ledger.get(slot.index).unwrap_or(0),
            )
        })
        .collect();

    rows.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    rows.into_iter()
        .enumerate()
        .map(|(idx, (slot, label, score))| RankingEntry {
            position: idx + 1,
            label: label.to_string(),
            score,
            slot,
        })
        .collect()
}
