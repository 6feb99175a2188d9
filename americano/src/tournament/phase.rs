//! Setup/running lifecycle of a tournament.

use enum_dispatch::enum_dispatch;
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    errors::{NotReady, TournamentError, TournamentResult},
    models::TournamentSettings,
    setup::{RosterDraft, RosterDraw},
    state::TournamentState,
};
use crate::schedule::SlotIndex;

/// Read-only view shared by both phases.
#[enum_dispatch]
pub trait PhaseOverview {
    fn settings(&self) -> &TournamentSettings;

    fn is_running(&self) -> bool;

    /// Current labels in slot order. Blank entries stay blank during setup.
    fn labels(&self) -> Vec<String>;
}

impl PhaseOverview for RosterDraft {
    fn settings(&self) -> &TournamentSettings {
        RosterDraft::settings(self)
    }

    fn is_running(&self) -> bool {
        false
    }

    fn labels(&self) -> Vec<String> {
        self.entries().to_vec()
    }
}

impl PhaseOverview for TournamentState {
    fn settings(&self) -> &TournamentSettings {
        TournamentState::settings(self)
    }

    fn is_running(&self) -> bool {
        true
    }

    fn labels(&self) -> Vec<String> {
        self.roster().iter().map(|c| c.label.clone()).collect()
    }
}

/// Either collecting the roster or scoring rounds.
///
/// Settings are frozen once running; `reset` is the only way back to setup.
#[enum_dispatch(PhaseOverview)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentPhase {
    Setup(RosterDraft),
    Running(TournamentState),
}

impl TournamentPhase {
    pub fn new(settings: TournamentSettings) -> Self {
        Self::Setup(RosterDraft::new(settings))
    }

    pub fn draft(&self) -> TournamentResult<&RosterDraft> {
        match self {
            Self::Setup(draft) => Ok(draft),
            Self::Running(_) => Err(TournamentError::AlreadyStarted),
        }
    }

    pub fn running(&self) -> TournamentResult<&TournamentState> {
        match self {
            Self::Running(state) => Ok(state),
            Self::Setup(_) => Err(TournamentError::NotStarted),
        }
    }

    pub fn running_mut(&mut self) -> TournamentResult<&mut TournamentState> {
        match self {
            Self::Running(state) => Ok(state),
            Self::Setup(_) => Err(TournamentError::NotStarted),
        }
    }

    pub fn set_entry(&mut self, slot: SlotIndex, label: impl Into<String>) -> TournamentResult<()> {
        match self {
            Self::Setup(draft) => draft.set_entry(slot, label),
            Self::Running(_) => Err(TournamentError::AlreadyStarted),
        }
    }

    pub fn fill<S: AsRef<str>>(&mut self, labels: &[S]) -> TournamentResult<()> {
        match self {
            Self::Setup(draft) => draft.fill(labels),
            Self::Running(_) => Err(TournamentError::AlreadyStarted),
        }
    }

    pub fn readiness(&self) -> TournamentResult<Result<(), NotReady>> {
        Ok(self.draft()?.readiness())
    }

    /// Move from setup to running. The draft is kept if the roster is not ready.
    pub fn start<R: Rng>(&mut self, draw: &mut RosterDraw<R>) -> TournamentResult<&TournamentState> {
        let state = self.draft()?.start(draw)?;
        *self = Self::Running(state);
        self.running()
    }

    /// Back to setup with the same settings and a blank roster.
    pub fn reset(&mut self) {
        let settings = *PhaseOverview::settings(self);
        info!("Tournament reset to setup ({})", settings.mode);
        *self = Self::new(settings);
    }

    /// Resume a previously saved tournament.
    pub fn restore(state: TournamentState) -> TournamentResult<Self> {
        state.check_consistency()?;
        Ok(Self::Running(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::GameMode;
    use crate::tournament::models::PairingType;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("P{i}")).collect()
    }

    #[test]
    fn test_new_phase_is_setup() {
        let phase = TournamentPhase::new(TournamentSettings::new(GameMode::Super8));
        assert!(!phase.is_running());
        assert_eq!(phase.labels().len(), 8);
        assert_eq!(phase.running(), Err(TournamentError::NotStarted));
    }

    #[test]
    fn test_start_requires_ready_roster() {
        let mut phase = TournamentPhase::new(TournamentSettings::new(GameMode::Super8));
        phase.fill(&names(7)).unwrap();
        assert!(matches!(
            phase.start(&mut RosterDraw::new()),
            Err(TournamentError::NotReady(_))
        ));
        assert!(!phase.is_running());

        phase.set_entry(8, "P8").unwrap();
        phase.start(&mut RosterDraw::new()).unwrap();
        assert!(phase.is_running());
        assert_eq!(phase.labels(), names(8));
    }

    #[test]
    fn test_running_rejects_setup_edits() {
        let mut phase = TournamentPhase::new(TournamentSettings::new(GameMode::Super6Fixed));
        phase.fill(&names(6)).unwrap();
        phase.start(&mut RosterDraw::new()).unwrap();

        assert_eq!(phase.set_entry(1, "X"), Err(TournamentError::AlreadyStarted));
        assert!(matches!(
            phase.start(&mut RosterDraw::new()),
            Err(TournamentError::AlreadyStarted)
        ));
    }

    #[test]
    fn test_reset_clears_roster_and_scores() {
        let settings = TournamentSettings::new(GameMode::Super8).with_pairing(PairingType::Random);
        let mut phase = TournamentPhase::new(settings);
        phase.fill(&names(8)).unwrap();
        phase.start(&mut RosterDraw::new()).unwrap();
        phase.running_mut().unwrap().record_score(1, 5).unwrap();

        phase.reset();
        assert!(!phase.is_running());
        assert!(phase.labels().iter().all(String::is_empty));
        assert_eq!(*phase.settings(), settings);

        phase.fill(&names(8)).unwrap();
        phase.start(&mut RosterDraw::new()).unwrap();
        assert!(phase.running().unwrap().ledger().iter().all(|(_, s)| s == 0));
    }

    #[test]
    fn test_restore_checks_consistency() {
        let state = TournamentState::start(&names(8), GameMode::Super8, PairingType::Manual).unwrap();
        let phase = TournamentPhase::restore(state).unwrap();
        assert!(phase.is_running());
    }
}
