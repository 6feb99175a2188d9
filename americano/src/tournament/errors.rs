//! Tournament error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::SlotIndex;

/// Errors raised by the tournament core.
#[derive(Debug, Clone, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum TournamentError {
    #[error("no schedule for {competitor_count} competitors (fixed pairs: {fixed_pairs})")]
    UnsupportedMode {
        competitor_count: usize,
        fixed_pairs: bool,
    },
    #[error("unknown mode '{0}'")]
    UnknownMode(String),
    #[error("slot {slot} is outside the roster (1..={roster_len})")]
    InvalidSlot { slot: SlotIndex, roster_len: usize },
    #[error("court {court} is not played this round (1..={court_count})")]
    InvalidCourt { court: usize, court_count: usize },
    #[error("score of slot {slot} would overflow")]
    ScoreOverflow { slot: SlotIndex },
    #[error(transparent)]
    NotReady(#[from] NotReady),
    #[error("tournament has not started")]
    NotStarted,
    #[error("tournament already started")]
    AlreadyStarted,
    #[error("inconsistent tournament state: {0}")]
    InconsistentState(String),
}

/// The roster still has blank slots.
///
/// Recoverable: the caller keeps collecting names and asks again.
#[derive(Debug, Clone, Deserialize, Eq, Error, PartialEq, Serialize)]
#[error("roster not ready: {filled} of {expected} slots filled")]
pub struct NotReady {
    pub filled: usize,
    pub expected: usize,
    /// 1-based slots that are missing or blank.
    pub blank_slots: Vec<SlotIndex>,
}

/// Unrecognized option value (pairing type, scoring model).
#[derive(Debug, Clone, Eq, Error, PartialEq)]
#[error("invalid {kind} '{value}'")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
}

pub type TournamentResult<T> = Result<T, TournamentError>;
