//! Structural checks over a schedule: pairing coverage and byes.

use serde::Serialize;
use std::collections::BTreeMap;

use super::catalog::{ScheduleDefinition, SlotIndex};

/// Unordered pair of slots, smaller index first.
pub type Pairing = (SlotIndex, SlotIndex);

/// Result of checking a schedule against the no-repeat rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairingAudit {
    /// Pairings that meet more than once, with how often they meet.
    pub repeated: Vec<(Pairing, usize)>,
    /// Pairings that never meet.
    pub missing: Vec<Pairing>,
}

impl PairingAudit {
    /// Every pairing meets exactly once.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.repeated.is_empty() && self.missing.is_empty()
    }
}

impl ScheduleDefinition {
    /// Count how often every unordered pairing meets across the schedule.
    #[must_use]
    pub fn pairing_counts(&self) -> BTreeMap<Pairing, usize> {
        let mut counts = BTreeMap::new();
        for round in self.rounds() {
            for m in round.matches() {
                for pairing in m.pairings() {
                    *counts.entry(pairing).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    #[must_use]
    pub fn audit(&self) -> PairingAudit {
        let counts = self.pairing_counts();
        let n = self.competitor_count();

        let repeated = counts
            .iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(&pairing, &count)| (pairing, count))
            .collect();

        let missing = (1..=n)
            .flat_map(|a| ((a + 1)..=n).map(move |b| (a, b)))
            .filter(|pairing| !counts.contains_key(pairing))
            .collect();

        PairingAudit { repeated, missing }
    }

    /// Slots that sit out the round at a 0-based index.
    #[must_use]
    pub fn byes(&self, round_index: usize) -> Vec<SlotIndex> {
        let Some(round) = self.round(round_index) else {
            return Vec::new();
        };
        (1..=self.competitor_count())
            .filter(|slot| !round.competitors().any(|seated| seated == *slot))
            .collect()
    }

    /// Every slot appears in exactly one match of every round.
    #[must_use]
    pub fn has_full_participation(&self) -> bool {
        let n = self.competitor_count();
        self.rounds().all(|round| {
            let mut seen = vec![0usize; n];
            for slot in round.competitors() {
                match slot.checked_sub(1).and_then(|idx| seen.get_mut(idx)) {
                    Some(count) => *count += 1,
                    None => return false,
                }
            }
            seen.iter().all(|&count| count == 1)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::schedule::{CATALOG, GameMode};

    #[test]
    fn test_super6_fixed_is_clean() {
        let audit = GameMode::Super6Fixed.schedule().audit();
        assert!(audit.is_clean(), "{audit:?}");
    }

    #[test]
    fn test_no_byes_in_any_round() {
        for definition in CATALOG.iter() {
            assert!(definition.has_full_participation(), "{}", definition.mode());
            for idx in 0..definition.round_count() {
                assert!(definition.byes(idx).is_empty());
            }
        }
    }

    #[test]
    fn test_byes_out_of_range_round() {
        assert!(GameMode::Super8.schedule().byes(99).is_empty());
    }

    #[test]
    fn test_pairing_counts_cover_every_match() {
        for definition in CATALOG.iter() {
            let mode = definition.mode();
            let pairings_per_match = if mode.is_fixed_pairs() { 1 } else { 2 };
            let total: usize = definition.pairing_counts().values().sum();
            assert_eq!(
                total,
                definition.round_count() * mode.courts_per_round() * pairings_per_match
            );
        }
    }
}
