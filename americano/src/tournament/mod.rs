//! Tournament lifecycle: roster validation, the running state, round
//! navigation and the live ranking.
//!
//! ```
//! use americano::schedule::GameMode;
//! use americano::tournament::{PairingType, TournamentState};
//!
//! let players: Vec<String> = (1..=8).map(|i| format!("Player {i}")).collect();
//! let mut state = TournamentState::start(&players, GameMode::Super8, PairingType::Manual).unwrap();
//!
//! state.record_score(2, 6).unwrap();
//! state.advance();
//!
//! assert_eq!(state.ranking()[0].label, "Player 2");
//! assert_eq!(state.current_round().unwrap().number(), 2);
//! ```

pub mod errors;
pub mod models;
pub mod navigator;
pub mod phase;
pub mod ranking;
pub mod setup;
pub mod state;

pub use errors::{NotReady, ParseOptionError, TournamentError, TournamentResult};
pub use models::{
    CompetitorSlot, CourtView, MatchResult, PairingType, Points, ScoreLedger, ScoringModel,
    TournamentSettings,
};
pub use navigator::RoundNavigator;
pub use phase::{PhaseOverview, TournamentPhase};
pub use ranking::{RankingEntry, rank};
pub use setup::{RosterDraft, RosterDraw, validate};
pub use state::TournamentState;
