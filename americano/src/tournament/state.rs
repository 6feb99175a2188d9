//! Running tournament: roster, round pointer and score ledger.

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{
    errors::{TournamentError, TournamentResult},
    models::{
        CompetitorSlot, CourtView, MatchResult, PairingType, Points, ScoreLedger,
        TournamentSettings,
    },
    navigator::RoundNavigator,
    ranking::{RankingEntry, rank},
    setup::{RosterDraw, validate},
};
use crate::schedule::{GameMode, Round, ScheduleDefinition, SlotIndex};

/// A started tournament.
///
/// Slot indices are bound once at start and never change; they are the join
/// key between the roster and the schedule tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentState {
    settings: TournamentSettings,
    roster: Vec<CompetitorSlot>,
    navigator: RoundNavigator,
    ledger: ScoreLedger,
    results: Vec<MatchResult>,
}

impl TournamentState {
    /// Start a tournament with games scoring.
    ///
    /// Labels are bound with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// `NotReady` if any of the mode's slots is missing or blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use americano::schedule::GameMode;
    /// use americano::tournament::{PairingType, TournamentState};
    ///
    /// let players: Vec<String> = (1..=8).map(|i| format!("P{i}")).collect();
    /// let state = TournamentState::start(&players, GameMode::Super8, PairingType::Manual).unwrap();
    /// assert_eq!(state.current_matches()[0].labels(), vec!["P1", "P2", "P3", "P4"]);
    /// ```
    pub fn start<S: AsRef<str>>(
        entries: &[S],
        mode: GameMode,
        pairing: PairingType,
    ) -> TournamentResult<Self> {
        let settings = TournamentSettings::new(mode).with_pairing(pairing);
        Self::begin(entries, settings, &mut RosterDraw::new())
    }

    /// Start a tournament from full settings, drawing slots with `draw`.
    pub fn begin<S: AsRef<str>, R: Rng>(
        entries: &[S],
        settings: TournamentSettings,
        draw: &mut RosterDraw<R>,
    ) -> TournamentResult<Self> {
        let schedule = settings.mode.schedule();
        validate(entries, schedule.competitor_count())?;

        let mut labels: Vec<String> = entries
            .iter()
            .map(|entry| entry.as_ref().trim().to_string())
            .collect();
        draw.arrange(&mut labels, settings.pairing);

        let roster: Vec<CompetitorSlot> = labels
            .into_iter()
            .enumerate()
            .map(|(idx, label)| CompetitorSlot::new(idx + 1, label))
            .collect();

        info!(
            "Tournament started: mode={} pairing={} scoring={} rounds={}",
            settings.mode,
            settings.pairing,
            settings.scoring,
            schedule.round_count()
        );

        Ok(Self {
            settings,
            ledger: ScoreLedger::new(roster.len()),
            roster,
            navigator: RoundNavigator::new(schedule.round_count()),
            results: Vec::new(),
        })
    }

    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    pub fn mode(&self) -> GameMode {
        self.settings.mode
    }

    pub fn schedule(&self) -> &'static ScheduleDefinition {
        self.settings.mode.schedule()
    }

    pub fn roster(&self) -> &[CompetitorSlot] {
        &self.roster
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn navigator(&self) -> &RoundNavigator {
        &self.navigator
    }

    /// Label bound to a 1-based slot.
    pub fn label(&self, slot: SlotIndex) -> Option<&str> {
        slot.checked_sub(1)
            .and_then(|idx| self.roster.get(idx))
            .map(|competitor| competitor.label.as_str())
    }

    /// Accumulated score of a 1-based slot.
    pub fn score(&self, slot: SlotIndex) -> Option<Points> {
        self.ledger.get(slot)
    }

    /// 0-based index of the displayed round.
    pub fn current_round_index(&self) -> usize {
        self.navigator.current()
    }

    /// The displayed round.
    pub fn current_round(&self) -> TournamentResult<Round> {
        let index = self.navigator.current();
        self.schedule().round(index).ok_or_else(|| {
            TournamentError::InconsistentState(format!("round index {index} outside schedule"))
        })
    }

    pub fn advance(&mut self) -> usize {
        let before = self.navigator.current();
        let after = self.navigator.advance();
        if before == after {
            debug!("Already on last round {}", after + 1);
        } else {
            debug!("Advanced to round {}", after + 1);
        }
        after
    }

    pub fn retreat(&mut self) -> usize {
        let before = self.navigator.current();
        let after = self.navigator.retreat();
        if before == after {
            debug!("Already on first round");
        } else {
            debug!("Went back to round {}", after + 1);
        }
        after
    }

    /// Display a specific round (0-based, clamped).
    pub fn go_to_round(&mut self, index: usize) -> usize {
        self.navigator.go_to(index)
    }

    /// Add `delta` to a slot's score and return the new total.
    ///
    /// # Errors
    ///
    /// `InvalidSlot` if `slot` is not in `1..=roster_len`, `ScoreOverflow`
    /// if the total would overflow.
    pub fn record_score(&mut self, slot: SlotIndex, delta: Points) -> TournamentResult<Points> {
        let total = self.ledger.add(slot, delta)?;
        debug!("Slot {slot} {delta:+} -> {total}");
        Ok(total)
    }

    /// Record (or replace) the score of a court in the displayed round and
    /// credit both teams according to the scoring model.
    ///
    /// # Errors
    ///
    /// `InvalidCourt` if the court is not played in the displayed round,
    /// `ScoreOverflow` if a credit would overflow. Nothing changes on error.
    pub fn record_match_result(
        &mut self,
        court: usize,
        team1_score: Points,
        team2_score: Points,
    ) -> TournamentResult<MatchResult> {
        let round = self.current_round()?;
        let assignment = round.court(court).ok_or(TournamentError::InvalidCourt {
            court,
            court_count: round.court_count(),
        })?;
        let (team1, team2) = assignment.teams();

        let result = MatchResult {
            round: round.number(),
            court,
            team1: team1.to_vec(),
            team2: team2.to_vec(),
            team1_score,
            team2_score,
        };

        let scoring = self.settings.scoring;
        let previous = self
            .results
            .iter()
            .position(|r| r.round == result.round && r.court == court);

        let mut deltas = Vec::new();
        if let Some(pos) = previous {
            for (slot, points) in self.results[pos].credits(scoring) {
                let reversal = points
                    .checked_neg()
                    .ok_or(TournamentError::ScoreOverflow { slot })?;
                deltas.push((slot, reversal));
            }
        }
        deltas.extend(result.credits(scoring));
        self.ledger.apply(&deltas)?;

        if let Some(pos) = previous {
            let replaced = self.results.remove(pos);
            info!(
                "Replaced result for round {} court {court}: {}-{} -> {team1_score}-{team2_score}",
                result.round, replaced.team1_score, replaced.team2_score
            );
        }
        self.results.push(result.clone());
        Ok(result)
    }

    /// Result recorded for a 1-based round and court.
    pub fn result_for(&self, round: usize, court: usize) -> Option<&MatchResult> {
        self.results
            .iter()
            .find(|r| r.round == round && r.court == court)
    }

    /// Courts of the displayed round with labels resolved.
    pub fn current_matches(&self) -> Vec<CourtView> {
        self.matches_for_round(self.navigator.current())
    }

    /// Courts of any round (0-based). Empty for an unknown round.
    pub fn matches_for_round(&self, index: usize) -> Vec<CourtView> {
        let Some(round) = self.schedule().round(index) else {
            return Vec::new();
        };

        round
            .matches()
            .map(|m| {
                let (team1, team2) = m.teams();
                CourtView {
                    court: m.court(),
                    team1: self.resolve(team1),
                    team2: self.resolve(team2),
                    result: self
                        .result_for(round.number(), m.court())
                        .map(|r| (r.team1_score, r.team2_score)),
                }
            })
            .collect()
    }

    /// Live leaderboard.
    pub fn ranking(&self) -> Vec<RankingEntry> {
        rank(&self.roster, &self.ledger)
    }

    /// Verify the invariants a deserialized state must satisfy.
    pub fn check_consistency(&self) -> TournamentResult<()> {
        let schedule = self.schedule();
        let expected = schedule.competitor_count();

        if self.roster.len() != expected {
            return Err(inconsistent(format!(
                "roster has {} slots, mode {} needs {expected}",
                self.roster.len(),
                self.settings.mode
            )));
        }
        for (idx, competitor) in self.roster.iter().enumerate() {
            if competitor.index != idx + 1 {
                return Err(inconsistent(format!(
                    "roster position {} holds slot {}",
                    idx + 1,
                    competitor.index
                )));
            }
            if competitor.label.trim().is_empty() {
                return Err(inconsistent(format!("slot {} has a blank label", idx + 1)));
            }
        }
        if self.ledger.len() != expected {
            return Err(inconsistent(format!(
                "ledger has {} entries, roster has {expected}",
                self.ledger.len()
            )));
        }
        if !self.navigator.is_consistent() || self.navigator.round_count() != schedule.round_count()
        {
            return Err(inconsistent(format!(
                "round pointer {} of {} does not fit a {}-round schedule",
                self.navigator.current(),
                self.navigator.round_count(),
                schedule.round_count()
            )));
        }
        let mut recorded = HashSet::with_capacity(self.results.len());
        for result in &self.results {
            if !recorded.insert((result.round, result.court)) {
                return Err(inconsistent(format!(
                    "round {} court {} has more than one result",
                    result.round, result.court
                )));
            }
            let seats = result
                .round
                .checked_sub(1)
                .and_then(|idx| schedule.round(idx))
                .and_then(|round| round.court(result.court))
                .map(|m| m.teams());
            match seats {
                Some((team1, team2)) if team1 == result.team1 && team2 == result.team2 => {}
                _ => {
                    return Err(inconsistent(format!(
                        "result for round {} court {} does not match the schedule",
                        result.round, result.court
                    )));
                }
            }
        }
        Ok(())
    }

    fn resolve(&self, slots: &[SlotIndex]) -> Vec<CompetitorSlot> {
        slots
            .iter()
            .map(|&slot| CompetitorSlot::new(slot, self.label(slot).unwrap_or_default()))
            .collect()
    }
}

fn inconsistent(reason: String) -> TournamentError {
    TournamentError::InconsistentState(reason)
}
