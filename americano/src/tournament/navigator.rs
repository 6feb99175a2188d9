//! Round navigation with boundary clamping.
//!
//! The navigator never wraps and never signals completion: advancing on the
//! last round or retreating on the first is a no-op. The operator decides
//! when scoring is over.

use serde::{Deserialize, Serialize};

/// Pointer to the displayed round, always inside `0..round_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundNavigator {
    current: usize,
    round_count: usize,
}

impl RoundNavigator {
    /// Navigator positioned on the first round.
    pub fn new(round_count: usize) -> Self {
        Self {
            current: 0,
            round_count,
        }
    }

    /// 0-based index of the displayed round.
    pub fn current(&self) -> usize {
        self.current
    }

    /// 1-based number of the displayed round.
    pub fn round_number(&self) -> usize {
        self.current + 1
    }

    pub fn round_count(&self) -> usize {
        self.round_count
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.round_count
    }

    /// Move forward one round, clamped to the last round.
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1).min(self.last_index());
        self.current
    }

    /// Move back one round, clamped to the first round.
    pub fn retreat(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// Jump to a 0-based round, clamped into range.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.current = index.min(self.last_index());
        self.current
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.round_count > 0 && self.current < self.round_count
    }

    fn last_index(&self) -> usize {
        self.round_count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_first_round() {
        let nav = RoundNavigator::new(7);
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.round_number(), 1);
        assert!(nav.is_first());
        assert!(!nav.is_last());
    }

    #[test]
    fn test_retreat_on_first_round_is_noop() {
        let mut nav = RoundNavigator::new(7);
        assert_eq!(nav.retreat(), 0);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_advance_on_last_round_is_noop() {
        let mut nav = RoundNavigator::new(7);
        for _ in 0..6 {
            nav.advance();
        }
        assert!(nav.is_last());
        assert_eq!(nav.advance(), 6);
        assert_eq!(nav.round_number(), 7);
    }

    #[test]
    fn test_advance_then_retreat_returns_to_interior_round() {
        let mut nav = RoundNavigator::new(11);
        nav.go_to(4);
        nav.advance();
        nav.retreat();
        assert_eq!(nav.current(), 4);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut nav = RoundNavigator::new(5);
        assert_eq!(nav.go_to(99), 4);
        assert_eq!(nav.go_to(2), 2);
    }

    #[test]
    fn test_single_round_never_moves() {
        let mut nav = RoundNavigator::new(1);
        assert!(nav.is_first() && nav.is_last());
        assert_eq!(nav.advance(), 0);
        assert_eq!(nav.retreat(), 0);
    }
}
