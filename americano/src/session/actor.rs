//! Single-writer actor owning one tournament.

use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::messages::{SessionError, SessionMessage, SessionResult};
use crate::{
    db::{TournamentHandle, TournamentRepository},
    entitlement::UserId,
    schedule::SlotIndex,
    tournament::{
        CourtView, MatchResult, PhaseOverview, Points, RankingEntry, RosterDraw, TournamentPhase,
        TournamentSettings, TournamentState,
    },
};

const INBOX_CAPACITY: usize = 64;

/// Cloneable sender side of a session.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
}

impl SessionHandle {
    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> SessionResult<T> {
        let (response, reply) = oneshot::channel();
        self.sender
            .send(message(response))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply.await.map_err(|_| SessionError::Closed)
    }

    pub async fn set_entry(&self, slot: SlotIndex, label: impl Into<String>) -> SessionResult<()> {
        let label = label.into();
        Ok(self
            .request(|response| SessionMessage::SetEntry {
                slot,
                label,
                response,
            })
            .await??)
    }

    pub async fn fill(&self, labels: Vec<String>) -> SessionResult<()> {
        Ok(self
            .request(|response| SessionMessage::Fill { labels, response })
            .await??)
    }

    pub async fn start(&self) -> SessionResult<TournamentState> {
        Ok(self
            .request(|response| SessionMessage::Start { response })
            .await??)
    }

    pub async fn reset(&self) -> SessionResult<()> {
        self.request(|response| SessionMessage::Reset { response })
            .await
    }

    pub async fn advance(&self) -> SessionResult<usize> {
        Ok(self
            .request(|response| SessionMessage::Advance { response })
            .await??)
    }

    pub async fn retreat(&self) -> SessionResult<usize> {
        Ok(self
            .request(|response| SessionMessage::Retreat { response })
            .await??)
    }

    pub async fn record_score(&self, slot: SlotIndex, delta: Points) -> SessionResult<Points> {
        Ok(self
            .request(|response| SessionMessage::RecordScore {
                slot,
                delta,
                response,
            })
            .await??)
    }

    pub async fn record_result(
        &self,
        court: usize,
        team1_score: Points,
        team2_score: Points,
    ) -> SessionResult<MatchResult> {
        Ok(self
            .request(|response| SessionMessage::RecordResult {
                court,
                team1_score,
                team2_score,
                response,
            })
            .await??)
    }

    pub async fn current_matches(&self) -> SessionResult<Vec<CourtView>> {
        Ok(self
            .request(|response| SessionMessage::CurrentMatches { response })
            .await??)
    }

    pub async fn ranking(&self) -> SessionResult<Vec<RankingEntry>> {
        Ok(self
            .request(|response| SessionMessage::Ranking { response })
            .await??)
    }

    pub async fn snapshot(&self) -> SessionResult<TournamentPhase> {
        self.request(|response| SessionMessage::Snapshot { response })
            .await
    }

    pub async fn save(&self, owner: UserId, name: impl Into<String>) -> SessionResult<TournamentHandle> {
        let name = name.into();
        self.request(|response| SessionMessage::Save {
            owner,
            name,
            response,
        })
        .await?
    }

    pub async fn load(&self, handle: TournamentHandle) -> SessionResult<()> {
        self.request(|response| SessionMessage::Load { handle, response })
            .await?
    }

    /// Ask the actor to stop. Pending requests already queued are still served.
    pub async fn close(&self) -> SessionResult<()> {
        self.sender
            .send(SessionMessage::Close)
            .await
            .map_err(|_| SessionError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Owns a [`TournamentPhase`] and applies messages to it one at a time.
pub struct TournamentActor {
    phase: TournamentPhase,
    inbox: mpsc::Receiver<SessionMessage>,
    draw: RosterDraw<StdRng>,
    repository: Option<Arc<dyn TournamentRepository>>,
    saved_as: Option<TournamentHandle>,
}

impl TournamentActor {
    /// Create an actor in setup and the handle that talks to it.
    pub fn new(settings: TournamentSettings) -> (Self, SessionHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);

        let actor = Self {
            phase: TournamentPhase::new(settings),
            inbox,
            draw: RosterDraw::with_rng(StdRng::from_os_rng()),
            repository: None,
            saved_as: None,
        };

        (actor, SessionHandle { sender })
    }

    pub fn with_repository(mut self, repository: Arc<dyn TournamentRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Seed the roster draw, for reproducible random pairing.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.draw = RosterDraw::with_rng(StdRng::seed_from_u64(seed));
        self
    }

    /// Spawn the actor on the current tokio runtime.
    pub fn spawn(settings: TournamentSettings) -> SessionHandle {
        let (actor, handle) = Self::new(settings);
        tokio::spawn(actor.run());
        handle
    }

    pub async fn run(mut self) {
        info!("Session for {} starting", self.phase.settings().mode);

        while let Some(message) = self.inbox.recv().await {
            if matches!(message, SessionMessage::Close) {
                break;
            }
            self.handle_message(message).await;
        }

        info!("Session for {} closed", self.phase.settings().mode);
    }

    async fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::SetEntry {
                slot,
                label,
                response,
            } => {
                let _ = response.send(self.phase.set_entry(slot, label));
            }
            SessionMessage::Fill { labels, response } => {
                let _ = response.send(self.phase.fill(&labels));
            }
            SessionMessage::Start { response } => {
                let result = self.phase.start(&mut self.draw).cloned();
                if result.is_ok() {
                    self.saved_as = None;
                }
                let _ = response.send(result);
            }
            SessionMessage::Reset { response } => {
                self.phase.reset();
                self.saved_as = None;
                let _ = response.send(());
            }
            SessionMessage::Advance { response } => {
                let _ = response.send(self.phase.running_mut().map(|state| state.advance()));
            }
            SessionMessage::Retreat { response } => {
                let _ = response.send(self.phase.running_mut().map(|state| state.retreat()));
            }
            SessionMessage::RecordScore {
                slot,
                delta,
                response,
            } => {
                let result = self
                    .phase
                    .running_mut()
                    .and_then(|state| state.record_score(slot, delta));
                let _ = response.send(result);
            }
            SessionMessage::RecordResult {
                court,
                team1_score,
                team2_score,
                response,
            } => {
                let result = self
                    .phase
                    .running_mut()
                    .and_then(|state| state.record_match_result(court, team1_score, team2_score));
                let _ = response.send(result);
            }
            SessionMessage::CurrentMatches { response } => {
                let _ = response.send(self.phase.running().map(TournamentState::current_matches));
            }
            SessionMessage::Ranking { response } => {
                let _ = response.send(self.phase.running().map(TournamentState::ranking));
            }
            SessionMessage::Snapshot { response } => {
                let _ = response.send(self.phase.clone());
            }
            SessionMessage::Save {
                owner,
                name,
                response,
            } => {
                let _ = response.send(self.save(owner, &name).await);
            }
            SessionMessage::Load { handle, response } => {
                let _ = response.send(self.load(handle).await);
            }
            SessionMessage::Close => {}
        }
    }

    async fn save(&mut self, owner: UserId, name: &str) -> SessionResult<TournamentHandle> {
        let repository = self.repository.as_ref().ok_or(SessionError::NoRepository)?;
        let state = self.phase.running()?;

        match self.saved_as {
            Some(handle) => {
                repository.update(handle, state).await?;
                debug!("Session saved over {handle}");
                Ok(handle)
            }
            None => {
                let handle = repository.save(owner, name, state).await?;
                self.saved_as = Some(handle);
                Ok(handle)
            }
        }
    }

    async fn load(&mut self, handle: TournamentHandle) -> SessionResult<()> {
        let repository = self.repository.as_ref().ok_or(SessionError::NoRepository)?;
        let state = repository.load(handle).await.inspect_err(|e| {
            warn!("Failed to load tournament {handle}: {e}");
        })?;

        self.phase = TournamentPhase::restore(state)?;
        self.saved_as = Some(handle);
        info!("Session resumed tournament {handle}");
        Ok(())
    }
}
