//! Fixed round-robin tables and the catalog that serves them.
//!
//! The tables are data, not computed. Slot numbers are 1-based and match the
//! order in which competitors were entered at setup.

use super::modes::GameMode;
use crate::tournament::errors::TournamentResult;

/// 1-based roster slot referenced by the schedule tables.
pub type SlotIndex = usize;

type CourtTable = &'static [SlotIndex];
type RoundTable = &'static [CourtTable];

const SUPER8: &[RoundTable] = &[
    &[&[1, 2, 3, 4], &[5, 6, 7, 8]],
    &[&[1, 3, 2, 5], &[4, 7, 6, 8]],
    &[&[1, 4, 2, 6], &[3, 7, 5, 8]],
    &[&[1, 5, 2, 7], &[3, 6, 4, 8]],
    &[&[1, 6, 2, 8], &[3, 5, 4, 7]],
    &[&[1, 7, 3, 8], &[2, 4, 5, 6]],
    &[&[1, 8, 3, 6], &[2, 5, 4, 7]],
];

const SUPER12: &[RoundTable] = &[
    &[&[1, 2, 3, 4], &[5, 6, 7, 8], &[9, 10, 11, 12]],
    &[&[1, 3, 2, 5], &[4, 6, 7, 9], &[8, 10, 11, 12]],
    &[&[1, 4, 2, 6], &[3, 5, 7, 10], &[8, 9, 11, 12]],
    &[&[1, 5, 2, 7], &[3, 6, 4, 8], &[9, 10, 11, 12]],
    &[&[1, 6, 2, 8], &[3, 7, 4, 9], &[5, 10, 11, 12]],
    &[&[1, 7, 2, 9], &[3, 8, 4, 10], &[5, 6, 11, 12]],
    &[&[1, 8, 2, 10], &[3, 9, 4, 11], &[5, 7, 6, 12]],
    &[&[1, 9, 2, 11], &[3, 10, 4, 12], &[5, 8, 6, 7]],
    &[&[1, 10, 2, 12], &[3, 11, 4, 7], &[5, 9, 6, 8]],
    &[&[1, 11, 3, 12], &[2, 7, 4, 8], &[5, 6, 9, 10]],
    &[&[1, 12, 2, 3], &[4, 5, 6, 7], &[8, 9, 10, 11]],
];

const SUPER6_FIXED: &[RoundTable] = &[
    &[&[1, 2], &[3, 4], &[5, 6]],
    &[&[1, 3], &[2, 5], &[4, 6]],
    &[&[1, 4], &[2, 6], &[3, 5]],
    &[&[1, 5], &[2, 4], &[3, 6]],
    &[&[1, 6], &[2, 3], &[4, 5]],
];

const SUPER8_FIXED: &[RoundTable] = &[
    &[&[1, 2], &[3, 4], &[5, 6], &[7, 8]],
    &[&[1, 3], &[2, 5], &[4, 7], &[6, 8]],
    &[&[1, 4], &[2, 6], &[3, 8], &[5, 7]],
    &[&[1, 5], &[2, 7], &[3, 6], &[4, 8]],
    &[&[1, 6], &[2, 8], &[3, 5], &[4, 7]],
    &[&[1, 7], &[2, 3], &[4, 6], &[5, 8]],
    &[&[1, 8], &[2, 4], &[3, 7], &[5, 6]],
];

const SUPER12_FIXED: &[RoundTable] = &[
    &[&[1, 2], &[3, 4], &[5, 6], &[7, 8], &[9, 10], &[11, 12]],
    &[&[1, 3], &[2, 5], &[4, 7], &[6, 9], &[8, 11], &[10, 12]],
    &[&[1, 4], &[2, 6], &[3, 8], &[5, 9], &[7, 10], &[11, 12]],
    &[&[1, 5], &[2, 7], &[3, 6], &[4, 8], &[9, 11], &[10, 12]],
    &[&[1, 6], &[2, 8], &[3, 9], &[4, 10], &[5, 11], &[7, 12]],
    &[&[1, 7], &[2, 9], &[3, 10], &[4, 11], &[5, 8], &[6, 12]],
    &[&[1, 8], &[2, 10], &[3, 11], &[4, 12], &[5, 7], &[6, 9]],
    &[&[1, 9], &[2, 11], &[3, 12], &[4, 5], &[6, 8], &[7, 10]],
    &[&[1, 10], &[2, 12], &[3, 5], &[4, 6], &[7, 9], &[8, 11]],
    &[&[1, 11], &[2, 3], &[4, 7], &[5, 10], &[6, 12], &[8, 9]],
    &[&[1, 12], &[2, 4], &[3, 7], &[5, 8], &[6, 10], &[9, 11]],
];

/// Process-wide registry of every supported schedule.
pub static CATALOG: ScheduleCatalog = ScheduleCatalog {
    definitions: [
        ScheduleDefinition::new(GameMode::Super8, SUPER8),
        ScheduleDefinition::new(GameMode::Super12, SUPER12),
        ScheduleDefinition::new(GameMode::Super6Fixed, SUPER6_FIXED),
        ScheduleDefinition::new(GameMode::Super8Fixed, SUPER8_FIXED),
        ScheduleDefinition::new(GameMode::Super12Fixed, SUPER12_FIXED),
    ],
};

/// Immutable mapping from a mode key to its fixed sequence of rounds.
#[derive(Debug)]
pub struct ScheduleCatalog {
    definitions: [ScheduleDefinition; 5],
}

impl ScheduleCatalog {
    #[must_use]
    pub fn global() -> &'static ScheduleCatalog {
        &CATALOG
    }

    /// Find the schedule for a `(competitor_count, fixed_pairs)` key.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMode` when none of the five schedules matches.
    pub fn lookup(
        &self,
        competitor_count: usize,
        fixed_pairs: bool,
    ) -> TournamentResult<&ScheduleDefinition> {
        let mode = GameMode::from_key(competitor_count, fixed_pairs)?;
        Ok(self.get(mode))
    }

    #[must_use]
    pub fn get(&self, mode: GameMode) -> &ScheduleDefinition {
        let idx = match mode {
            GameMode::Super8 => 0,
            GameMode::Super12 => 1,
            GameMode::Super6Fixed => 2,
            GameMode::Super8Fixed => 3,
            GameMode::Super12Fixed => 4,
        };
        &self.definitions[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleDefinition> {
        self.definitions.iter()
    }
}

/// Shorthand for `ScheduleCatalog::global().lookup(..)`.
pub fn lookup(
    competitor_count: usize,
    fixed_pairs: bool,
) -> TournamentResult<&'static ScheduleDefinition> {
    CATALOG.lookup(competitor_count, fixed_pairs)
}

impl GameMode {
    /// The fixed schedule played in this mode.
    #[must_use]
    pub fn schedule(self) -> &'static ScheduleDefinition {
        CATALOG.get(self)
    }
}

/// The ordered rounds of one mode.
#[derive(Debug)]
pub struct ScheduleDefinition {
    mode: GameMode,
    rounds: &'static [RoundTable],
}

impl ScheduleDefinition {
    const fn new(mode: GameMode, rounds: &'static [RoundTable]) -> Self {
        Self { mode, rounds }
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn competitor_count(&self) -> usize {
        self.mode.competitor_count()
    }

    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Round at a 0-based index.
    #[must_use]
    pub fn round(&self, index: usize) -> Option<Round> {
        self.rounds.get(index).copied().map(|courts| Round {
            number: index + 1,
            courts,
        })
    }

    pub fn rounds(&self) -> impl Iterator<Item = Round> + '_ {
        self.rounds
            .iter()
            .copied()
            .enumerate()
            .map(|(index, courts)| Round {
                number: index + 1,
                courts,
            })
    }
}

/// One scheduled time-slot: a set of simultaneous matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    number: usize,
    courts: RoundTable,
}

impl Round {
    /// 1-based round number.
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    #[must_use]
    pub fn court_count(&self) -> usize {
        self.courts.len()
    }

    /// Match on a 1-based court number.
    #[must_use]
    pub fn court(&self, court: usize) -> Option<Match> {
        court
            .checked_sub(1)
            .and_then(|idx| self.courts.get(idx))
            .copied()
            .map(|seats| Match { court, seats })
    }

    pub fn matches(&self) -> impl Iterator<Item = Match> + '_ {
        self.courts.iter().copied().enumerate().map(|(idx, seats)| Match {
            court: idx + 1,
            seats,
        })
    }

    /// Every slot seated in this round, court by court.
    pub fn competitors(&self) -> impl Iterator<Item = SlotIndex> + '_ {
        self.courts.iter().flat_map(|seats| seats.iter().copied())
    }
}

/// One court's assignment within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    court: usize,
    seats: CourtTable,
}

impl Match {
    /// 1-based court number.
    #[must_use]
    pub fn court(&self) -> usize {
        self.court
    }

    #[must_use]
    pub fn seats(&self) -> &'static [SlotIndex] {
        self.seats
    }

    #[must_use]
    pub fn contains(&self, slot: SlotIndex) -> bool {
        self.seats.contains(&slot)
    }

    /// The two sides of the court. Four seats split into teams `1-2` and `3-4`;
    /// two seats are one fixed pair per side.
    #[must_use]
    pub fn teams(&self) -> (&'static [SlotIndex], &'static [SlotIndex]) {
        self.seats.split_at(self.seats.len() / 2)
    }

    /// Unordered pairings this match consumes under the no-repeat rule:
    /// partnerships on four-seat courts, the opponents on two-seat courts.
    #[must_use]
    pub fn pairings(&self) -> Vec<(SlotIndex, SlotIndex)> {
        match self.seats {
            [a, b] => vec![ordered(*a, *b)],
            [a, b, c, d] => vec![ordered(*a, *b), ordered(*c, *d)],
            _ => Vec::new(),
        }
    }
}

fn ordered(a: SlotIndex, b: SlotIndex) -> (SlotIndex, SlotIndex) {
    if a <= b { (a, b) } else { (b, a) }
}
