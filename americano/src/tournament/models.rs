//! Tournament data models.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::errors::{ParseOptionError, TournamentError, TournamentResult};
use crate::schedule::{GameMode, SlotIndex};

/// Score unit. Negative deltas are corrections.
pub type Points = i64;

/// A roster entry bound to its permanent 1-based slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompetitorSlot {
    pub index: SlotIndex,
    /// Player name, or pair name in fixed-pair modes.
    pub label: String,
}

impl CompetitorSlot {
    pub fn new(index: SlotIndex, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

/// How roster entries are bound to slots when the tournament starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingType {
    /// Slots follow the order entries were typed in.
    #[default]
    Manual,
    /// Entries are drawn into slots at random.
    Random,
}

impl fmt::Display for PairingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingType::Manual => write!(f, "manual"),
            PairingType::Random => write!(f, "random"),
        }
    }
}

impl FromStr for PairingType {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(PairingType::Manual),
            "random" => Ok(PairingType::Random),
            _ => Err(ParseOptionError {
                kind: "pairing type",
                value: s.to_string(),
            }),
        }
    }
}

/// How a court result turns into ledger points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringModel {
    /// Every player of a team is credited the games that team won.
    #[default]
    Games,
    /// Every player of the winning team is credited one point; draws credit nobody.
    Wins,
}

impl fmt::Display for ScoringModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringModel::Games => write!(f, "games"),
            ScoringModel::Wins => write!(f, "wins"),
        }
    }
}

impl FromStr for ScoringModel {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "games" => Ok(ScoringModel::Games),
            "wins" => Ok(ScoringModel::Wins),
            _ => Err(ParseOptionError {
                kind: "scoring model",
                value: s.to_string(),
            }),
        }
    }
}

/// Choices made before the roster is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSettings {
    pub mode: GameMode,
    pub pairing: PairingType,
    pub scoring: ScoringModel,
}

impl TournamentSettings {
    /// Manual pairing, games scoring.
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            pairing: PairingType::default(),
            scoring: ScoringModel::default(),
        }
    }

    pub fn with_pairing(mut self, pairing: PairingType) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringModel) -> Self {
        self.scoring = scoring;
        self
    }
}

/// Accumulated score per slot, stored densely by `slot - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    scores: Vec<Points>,
}

impl ScoreLedger {
    /// Ledger with every slot at zero.
    pub fn new(slots: usize) -> Self {
        Self {
            scores: vec![0; slots],
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of a 1-based slot.
    pub fn get(&self, slot: SlotIndex) -> Option<Points> {
        slot.checked_sub(1)
            .and_then(|idx| self.scores.get(idx))
            .copied()
    }

    /// Add `delta` to a slot and return its new total.
    ///
    /// # Errors
    ///
    /// `InvalidSlot` for a slot outside the ledger, `ScoreOverflow` if the
    /// total would leave the `Points` range. The ledger is unchanged on error.
    pub fn add(&mut self, slot: SlotIndex, delta: Points) -> TournamentResult<Points> {
        let idx = self.index(slot)?;
        let total = self.scores[idx]
            .checked_add(delta)
            .ok_or(TournamentError::ScoreOverflow { slot })?;
        self.scores[idx] = total;
        Ok(total)
    }

    /// Apply several deltas in order, all or nothing.
    pub fn apply(&mut self, deltas: &[(SlotIndex, Points)]) -> TournamentResult<()> {
        let mut next = self.scores.clone();
        for &(slot, delta) in deltas {
            let idx = self.index(slot)?;
            next[idx] = next[idx]
                .checked_add(delta)
                .ok_or(TournamentError::ScoreOverflow { slot })?;
        }
        self.scores = next;
        Ok(())
    }

    fn index(&self, slot: SlotIndex) -> TournamentResult<usize> {
        slot.checked_sub(1)
            .filter(|&idx| idx < self.scores.len())
            .ok_or(TournamentError::InvalidSlot {
                slot,
                roster_len: self.scores.len(),
            })
    }

    /// `(slot, score)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, Points)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .map(|(idx, &score)| (idx + 1, score))
    }
}

impl From<Vec<Points>> for ScoreLedger {
    fn from(scores: Vec<Points>) -> Self {
        Self { scores }
    }
}

/// Final score of one court in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 1-based round number.
    pub round: usize,
    /// 1-based court number.
    pub court: usize,
    pub team1: Vec<SlotIndex>,
    pub team2: Vec<SlotIndex>,
    pub team1_score: Points,
    pub team2_score: Points,
}

impl MatchResult {
    /// Ledger credits this result is worth under a scoring model.
    pub fn credits(&self, scoring: ScoringModel) -> Vec<(SlotIndex, Points)> {
        let (team1_points, team2_points) = match scoring {
            ScoringModel::Games => (self.team1_score, self.team2_score),
            ScoringModel::Wins => match self.team1_score.cmp(&self.team2_score) {
                std::cmp::Ordering::Greater => (1, 0),
                std::cmp::Ordering::Less => (0, 1),
                std::cmp::Ordering::Equal => (0, 0),
            },
        };

        self.team1
            .iter()
            .map(|&slot| (slot, team1_points))
            .chain(self.team2.iter().map(|&slot| (slot, team2_points)))
            .collect()
    }
}

/// A court of the displayed round with labels resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtView {
    /// 1-based court number.
    pub court: usize,
    pub team1: Vec<CompetitorSlot>,
    pub team2: Vec<CompetitorSlot>,
    /// `(team1, team2)` score if a result was recorded.
    pub result: Option<(Points, Points)>,
}

impl CourtView {
    /// Everyone on the court, seat order.
    pub fn competitors(&self) -> impl Iterator<Item = &CompetitorSlot> {
        self.team1.iter().chain(self.team2.iter())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.competitors().map(|slot| slot.label.as_str()).collect()
    }
}
