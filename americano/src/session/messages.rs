//! Session actor message types.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::{
    db::{RepositoryError, TournamentHandle},
    entitlement::UserId,
    schedule::SlotIndex,
    tournament::{
        CourtView, MatchResult, Points, RankingEntry, TournamentError, TournamentPhase,
        TournamentResult, TournamentState,
    },
};

/// Errors returned through a [`SessionHandle`](super::SessionHandle).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is closed")]
    Closed,
    #[error("session has no repository")]
    NoRepository,
    #[error(transparent)]
    Tournament(#[from] TournamentError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Messages that can be sent to a `TournamentActor`
#[derive(Debug)]
pub enum SessionMessage {
    /// Type a roster entry during setup
    SetEntry {
        slot: SlotIndex,
        label: String,
        response: oneshot::Sender<TournamentResult<()>>,
    },

    /// Fill roster entries from the first slot
    Fill {
        labels: Vec<String>,
        response: oneshot::Sender<TournamentResult<()>>,
    },

    /// Setup -> running
    Start {
        response: oneshot::Sender<TournamentResult<TournamentState>>,
    },

    /// Running -> setup with a blank roster
    Reset { response: oneshot::Sender<()> },

    Advance {
        response: oneshot::Sender<TournamentResult<usize>>,
    },

    Retreat {
        response: oneshot::Sender<TournamentResult<usize>>,
    },

    /// Raw score adjustment for one slot
    RecordScore {
        slot: SlotIndex,
        delta: Points,
        response: oneshot::Sender<TournamentResult<Points>>,
    },

    /// Court result in the displayed round
    RecordResult {
        court: usize,
        team1_score: Points,
        team2_score: Points,
        response: oneshot::Sender<TournamentResult<MatchResult>>,
    },

    CurrentMatches {
        response: oneshot::Sender<TournamentResult<Vec<CourtView>>>,
    },

    Ranking {
        response: oneshot::Sender<TournamentResult<Vec<RankingEntry>>>,
    },

    /// Copy of the whole phase
    Snapshot {
        response: oneshot::Sender<TournamentPhase>,
    },

    /// Persist the running tournament; later saves update the same record
    Save {
        owner: UserId,
        name: String,
        response: oneshot::Sender<SessionResult<TournamentHandle>>,
    },

    /// Replace the session with a stored tournament
    Load {
        handle: TournamentHandle,
        response: oneshot::Sender<SessionResult<()>>,
    },

    /// Stop the actor loop
    Close,
}
