//! # Americano
//!
//! Round-robin "americano" tournament engine for padel-style doubles.
//!
//! Competitors (individual players, or pre-formed pairs) are entered once,
//! bound to permanent 1-based slots, and then walked through a fixed
//! schedule of rounds. Scores are adjusted per slot and the leaderboard is
//! derived on demand.
//!
//! ## Modes
//!
//! | Mode            | Competitors | Rounds | Courts | Seats/court |
//! |-----------------|-------------|--------|--------|-------------|
//! | `super8`        | 8 players   | 7      | 2      | 4           |
//! | `super12`       | 12 players  | 11     | 3      | 4           |
//! | `super6-fixed`  | 6 pairs     | 5      | 3      | 2           |
//! | `super8-fixed`  | 8 pairs     | 7      | 4      | 2           |
//! | `super12-fixed` | 12 pairs    | 11     | 6      | 2           |
//!
//! ## Core Modules
//!
//! - [`schedule`]: the fixed schedule tables, lookup and pairing audit
//! - [`tournament`]: roster validation, running state, navigation and ranking
//! - [`entitlement`]: which modes a caller may start
//! - [`db`]: configuration and persistence
//! - [`session`]: single-writer actor around one tournament
//!
//! ## Example
//!
//! ```
//! use americano::{GameMode, PairingType, TournamentState};
//!
//! let pairs: Vec<String> = (1..=6).map(|i| format!("Pair {i}")).collect();
//! let mut state = TournamentState::start(&pairs, GameMode::Super6Fixed, PairingType::Manual).unwrap();
//!
//! state.record_match_result(1, 6, 2).unwrap();
//! let leader = &state.ranking()[0];
//! assert_eq!((leader.label.as_str(), leader.score), ("Pair 1", 6));
//! ```

/// Persistence and database configuration.
pub mod db;

/// Premium entitlement rules.
pub mod entitlement;

/// Schedule catalog.
pub mod schedule;
pub use schedule::{GameMode, ScheduleDefinition, SlotIndex};

/// Single-writer tournament sessions.
pub mod session;

/// Tournament lifecycle.
pub mod tournament;
pub use tournament::{
    PairingType, RankingEntry, ScoringModel, TournamentError, TournamentPhase, TournamentResult,
    TournamentSettings, TournamentState,
};
