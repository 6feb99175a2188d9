//! Supported tournament modes.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::tournament::errors::{TournamentError, TournamentResult};

/// Seats on a court when every competitor is an individual (two teams of two).
pub const INDIVIDUAL_SEATS_PER_COURT: usize = 4;

/// Seats on a court when every competitor is a pre-formed pair.
pub const FIXED_PAIR_SEATS_PER_COURT: usize = 2;

/// One of the five supported schedule layouts.
///
/// A mode is identified either by its stable id (`super8`, `super6-fixed`, ...)
/// or by the `(competitor_count, fixed_pairs)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "super8")]
    Super8,
    #[serde(rename = "super12")]
    Super12,
    #[serde(rename = "super6-fixed")]
    Super6Fixed,
    #[serde(rename = "super8-fixed")]
    Super8Fixed,
    #[serde(rename = "super12-fixed")]
    Super12Fixed,
}

impl GameMode {
    /// Every supported mode, free modes first.
    pub const ALL: [GameMode; 5] = [
        GameMode::Super8,
        GameMode::Super12,
        GameMode::Super6Fixed,
        GameMode::Super8Fixed,
        GameMode::Super12Fixed,
    ];

    /// Resolve a mode from its `(competitor_count, fixed_pairs)` key.
    pub fn from_key(competitor_count: usize, fixed_pairs: bool) -> TournamentResult<Self> {
        match (competitor_count, fixed_pairs) {
            (8, false) => Ok(GameMode::Super8),
            (12, false) => Ok(GameMode::Super12),
            (6, true) => Ok(GameMode::Super6Fixed),
            (8, true) => Ok(GameMode::Super8Fixed),
            (12, true) => Ok(GameMode::Super12Fixed),
            _ => Err(TournamentError::UnsupportedMode {
                competitor_count,
                fixed_pairs,
            }),
        }
    }

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            GameMode::Super8 => "super8",
            GameMode::Super12 => "super12",
            GameMode::Super6Fixed => "super6-fixed",
            GameMode::Super8Fixed => "super8-fixed",
            GameMode::Super12Fixed => "super12-fixed",
        }
    }

    /// Human readable title shown in mode pickers.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            GameMode::Super8 => "Super 8 (individual)",
            GameMode::Super12 => "Super 12 (individual)",
            GameMode::Super6Fixed => "Super 6 (fixed pairs)",
            GameMode::Super8Fixed => "Super 8 (fixed pairs)",
            GameMode::Super12Fixed => "Super 12 (fixed pairs)",
        }
    }

    /// Number of roster slots (players, or pairs in fixed-pair modes).
    #[must_use]
    pub const fn competitor_count(self) -> usize {
        match self {
            GameMode::Super6Fixed => 6,
            GameMode::Super8 | GameMode::Super8Fixed => 8,
            GameMode::Super12 | GameMode::Super12Fixed => 12,
        }
    }

    #[must_use]
    pub const fn is_fixed_pairs(self) -> bool {
        matches!(
            self,
            GameMode::Super6Fixed | GameMode::Super8Fixed | GameMode::Super12Fixed
        )
    }

    /// Fixed-pair modes are reserved for premium accounts.
    #[must_use]
    pub const fn is_premium(self) -> bool {
        self.is_fixed_pairs()
    }

    #[must_use]
    pub const fn seats_per_court(self) -> usize {
        if self.is_fixed_pairs() {
            FIXED_PAIR_SEATS_PER_COURT
        } else {
            INDIVIDUAL_SEATS_PER_COURT
        }
    }

    #[must_use]
    pub const fn courts_per_round(self) -> usize {
        self.competitor_count() / self.seats_per_court()
    }

    /// Standard round-robin length: `competitor_count - 1`.
    #[must_use]
    pub const fn round_count(self) -> usize {
        self.competitor_count() - 1
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for GameMode {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.id() == wanted)
            .ok_or_else(|| TournamentError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_ids_round_trip() {
        for mode in GameMode::ALL {
            assert_eq!(mode.id().parse::<GameMode>().unwrap(), mode);
            assert_eq!(mode.to_string(), mode.id());
        }
        assert_eq!(" Super8-FIXED ".parse::<GameMode>().unwrap(), GameMode::Super8Fixed);
    }

    #[test]
    fn test_unknown_mode_id() {
        let err = "super10".parse::<GameMode>().unwrap_err();
        assert!(matches!(err, TournamentError::UnknownMode(ref id) if id == "super10"));
    }

    #[test]
    fn test_from_key() {
        assert_eq!(GameMode::from_key(8, false).unwrap(), GameMode::Super8);
        assert_eq!(GameMode::from_key(6, true).unwrap(), GameMode::Super6Fixed);
        assert!(matches!(
            GameMode::from_key(6, false),
            Err(TournamentError::UnsupportedMode {
                competitor_count: 6,
                fixed_pairs: false
            })
        ));
        assert!(GameMode::from_key(10, true).is_err());
    }

    #[test]
    fn test_court_geometry() {
        assert_eq!(GameMode::Super8.seats_per_court(), 4);
        assert_eq!(GameMode::Super8.courts_per_round(), 2);
        assert_eq!(GameMode::Super12.courts_per_round(), 3);
        assert_eq!(GameMode::Super6Fixed.courts_per_round(), 3);
        assert_eq!(GameMode::Super12Fixed.courts_per_round(), 6);
        assert_eq!(GameMode::Super12Fixed.round_count(), 11);
    }

    #[test]
    fn test_premium_modes_are_fixed_pairs() {
        let premium: Vec<_> = GameMode::ALL.into_iter().filter(|m| m.is_premium()).collect();
        assert_eq!(
            premium,
            vec![GameMode::Super6Fixed, GameMode::Super8Fixed, GameMode::Super12Fixed]
        );
    }

    #[test]
    fn test_serde_uses_mode_ids() {
        let json = serde_json::to_string(&GameMode::Super12Fixed).unwrap();
        assert_eq!(json, "\"super12-fixed\"");
        let mode: GameMode = serde_json::from_str("\"super8\"").unwrap();
        assert_eq!(mode, GameMode::Super8);
    }
}
