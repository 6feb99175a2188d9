//! Roster entry: the readiness gate and the slot draw.

use log::{debug, info};
use rand::{Rng, rngs::ThreadRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use super::{
    errors::{NotReady, TournamentError, TournamentResult},
    models::{PairingType, TournamentSettings},
    state::TournamentState,
};
use crate::schedule::SlotIndex;

/// Check that every one of `expected` slots holds a non-blank label.
///
/// Whitespace-only entries count as blank. Partial input is not a failure,
/// only "not ready yet".
///
/// # Examples
///
/// ```
/// use americano::tournament::validate;
///
/// assert!(validate(&["Ana", "Bia", "", ""], 4).is_err());
/// assert!(validate(&["Ana", "Bia", "Cia", "Dio"], 4).is_ok());
/// ```
pub fn validate<S: AsRef<str>>(entries: &[S], expected: usize) -> Result<(), NotReady> {
    let blank_slots: Vec<SlotIndex> = (0..expected)
        .filter(|&idx| {
            entries
                .get(idx)
                .is_none_or(|entry| entry.as_ref().trim().is_empty())
        })
        .map(|idx| idx + 1)
        .collect();

    let filled = entries
        .iter()
        .filter(|entry| !entry.as_ref().trim().is_empty())
        .count();

    if blank_slots.is_empty() && entries.len() == expected {
        Ok(())
    } else {
        Err(NotReady {
            filled,
            expected,
            blank_slots,
        })
    }
}

/// Roster being typed in before the tournament starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterDraft {
    settings: TournamentSettings,
    entries: Vec<String>,
}

impl RosterDraft {
    /// Blank entries, one per slot of the mode.
    pub fn new(settings: TournamentSettings) -> Self {
        Self {
            entries: vec![String::new(); settings.mode.competitor_count()],
            settings,
        }
    }

    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Overwrite the entry of a 1-based slot.
    pub fn set_entry(&mut self, slot: SlotIndex, label: impl Into<String>) -> TournamentResult<()> {
        let roster_len = self.entries.len();
        let entry = slot
            .checked_sub(1)
            .and_then(|idx| self.entries.get_mut(idx))
            .ok_or(TournamentError::InvalidSlot { slot, roster_len })?;
        *entry = label.into();
        Ok(())
    }

    /// Fill slots from the start, in order. Extra labels are rejected.
    pub fn fill<S: AsRef<str>>(&mut self, labels: &[S]) -> TournamentResult<()> {
        for (idx, label) in labels.iter().enumerate() {
            self.set_entry(idx + 1, label.as_ref())?;
        }
        Ok(())
    }

    pub fn readiness(&self) -> Result<(), NotReady> {
        validate(&self.entries, self.settings.mode.competitor_count())
    }

    pub fn is_ready(&self) -> bool {
        self.readiness().is_ok()
    }

    /// Bind the entries to slots and start scoring.
    pub fn start<R: Rng>(&self, draw: &mut RosterDraw<R>) -> TournamentResult<TournamentState> {
        TournamentState::begin(&self.entries, self.settings, draw)
    }
}

/// Randomizes slot order for [`PairingType::Random`].
pub struct RosterDraw<R: Rng = ThreadRng> {
    rng: R,
}

impl Default for RosterDraw<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterDraw<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> RosterDraw<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Reorder labels in place according to the pairing type.
    ///
    /// Manual pairing keeps entry order.
    pub fn arrange(&mut self, labels: &mut [String], pairing: PairingType) {
        match pairing {
            PairingType::Manual => {
                debug!("Keeping manual slot order for {} entries", labels.len());
            }
            PairingType::Random => {
                labels.shuffle(&mut self.rng);
                info!("Drew {} entries into random slots", labels.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::GameMode;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_partial_roster_not_ready() {
        let err = validate(&["Ana", "Bia", "", ""], 4).unwrap_err();
        assert_eq!(err.filled, 2);
        assert_eq!(err.expected, 4);
        assert_eq!(err.blank_slots, vec![3, 4]);
    }

    #[test]
    fn test_full_roster_ready() {
        assert!(validate(&["Ana", "Bia", "Cia", "Dio"], 4).is_ok());
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let err = validate(&["Ana", "  ", "Cia", "\t"], 4).unwrap_err();
        assert_eq!(err.blank_slots, vec![2, 4]);
    }

    #[test]
    fn test_short_and_long_rosters() {
        let err = validate(&["Ana", "Bia"], 4).unwrap_err();
        assert_eq!(err.blank_slots, vec![3, 4]);

        let err = validate(&["Ana", "Bia", "Cia"], 2).unwrap_err();
        assert!(err.blank_slots.is_empty());
        assert_eq!(err.filled, 3);
    }

    #[test]
    fn test_empty_roster_of_zero_is_ready() {
        let entries: [&str; 0] = [];
        assert!(validate(&entries, 0).is_ok());
    }

    #[test]
    fn test_draft_set_entry() {
        let mut draft = RosterDraft::new(TournamentSettings::new(GameMode::Super6Fixed));
        assert_eq!(draft.entries().len(), 6);
        assert!(!draft.is_ready());

        draft
            .fill(&["A&B", "C&D", "E&F", "G&H", "I&J", "K&L"])
            .unwrap();
        assert!(draft.is_ready());

        draft.set_entry(3, " ").unwrap();
        assert_eq!(draft.readiness().unwrap_err().blank_slots, vec![3]);

        assert!(matches!(
            draft.set_entry(7, "M&N"),
            Err(TournamentError::InvalidSlot { slot: 7, roster_len: 6 })
        ));
        assert!(draft.fill(&["1", "2", "3", "4", "5", "6", "7"]).is_err());
    }

    #[test]
    fn test_manual_draw_keeps_order() {
        let mut draw = RosterDraw::with_rng(StdRng::seed_from_u64(1));
        let mut labels: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        draw.arrange(&mut labels, PairingType::Manual);
        assert_eq!(labels, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_random_draw_is_a_permutation() {
        let mut draw = RosterDraw::with_rng(StdRng::seed_from_u64(42));
        let original: Vec<String> = (1..=12).map(|i| format!("P{i}")).collect();
        let mut labels = original.clone();
        draw.arrange(&mut labels, PairingType::Random);

        let mut sorted = labels.clone();
        sorted.sort();
        let mut expected = original.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
