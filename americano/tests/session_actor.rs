//! Tournament sessions driven through their handle.

#[cfg(test)]
mod session_tests {
    use americano::{
        GameMode, PairingType, TournamentError, TournamentPhase, TournamentSettings,
        db::MemoryTournamentRepository,
        session::{SessionError, TournamentActor},
        tournament::PhaseOverview,
    };
    use std::sync::Arc;
    use uuid::Uuid;

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("P{i}")).collect()
    }

    #[tokio::test]
    async fn test_session_runs_a_tournament() {
        let handle = TournamentActor::spawn(TournamentSettings::new(GameMode::Super8));

        assert!(matches!(
            handle.advance().await,
            Err(SessionError::Tournament(TournamentError::NotStarted))
        ));

        handle.fill(labels(8)).await.unwrap();
        let state = handle.start().await.unwrap();
        assert_eq!(state.label(1), Some("P1"));

        handle.record_result(1, 6, 1).await.unwrap();
        assert_eq!(handle.record_score(5, 2).await.unwrap(), 2);
        assert_eq!(handle.advance().await.unwrap(), 1);
        assert_eq!(handle.retreat().await.unwrap(), 0);
        assert_eq!(handle.retreat().await.unwrap(), 0);

        let courts = handle.current_matches().await.unwrap();
        assert_eq!(courts[0].result, Some((6, 1)));

        let ranking = handle.ranking().await.unwrap();
        assert_eq!(ranking[0].label, "P1");
        assert_eq!(ranking[0].score, 6);

        handle.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_start_rejected_until_ready() {
        let handle = TournamentActor::spawn(TournamentSettings::new(GameMode::Super6Fixed));
        handle.fill(labels(5)).await.unwrap();
        assert!(matches!(
            handle.start().await,
            Err(SessionError::Tournament(TournamentError::NotReady(_)))
        ));

        handle.set_entry(6, "P6").await.unwrap();
        handle.start().await.unwrap();
        assert!(matches!(
            handle.set_entry(1, "late").await,
            Err(SessionError::Tournament(TournamentError::AlreadyStarted))
        ));
    }

    #[tokio::test]
    async fn test_seeded_random_sessions_agree() {
        let settings = TournamentSettings::new(GameMode::Super12).with_pairing(PairingType::Random);
        let mut rosters = Vec::new();
        for _ in 0..2 {
            let (actor, handle) = TournamentActor::new(settings);
            tokio::spawn(actor.with_seed(7).run());
            handle.fill(labels(12)).await.unwrap();
            rosters.push(handle.start().await.unwrap().roster().to_vec());
        }
        assert_eq!(rosters[0], rosters[1]);
    }

    #[tokio::test]
    async fn test_save_and_resume() {
        let repo = Arc::new(MemoryTournamentRepository::new());
        let owner = Uuid::new_v4();

        let (actor, handle) = TournamentActor::new(TournamentSettings::new(GameMode::Super8Fixed));
        tokio::spawn(actor.with_repository(repo.clone()).run());
        handle.fill(labels(8)).await.unwrap();
        handle.start().await.unwrap();
        handle.record_result(4, 3, 6).await.unwrap();

        let saved = handle.save(owner, "Club night").await.unwrap();
        handle.advance().await.unwrap();
        assert_eq!(handle.save(owner, "ignored").await.unwrap(), saved);
        assert_eq!(repo.len().await, 1);
        handle.close().await.unwrap();

        let (actor, resumed) = TournamentActor::new(TournamentSettings::new(GameMode::Super8));
        tokio::spawn(actor.with_repository(repo.clone()).run());
        resumed.load(saved).await.unwrap();

        match resumed.snapshot().await.unwrap() {
            TournamentPhase::Running(state) => {
                assert_eq!(state.mode(), GameMode::Super8Fixed);
                assert_eq!(state.current_round_index(), 1);
                assert_eq!(state.score(8), Some(6));
            }
            TournamentPhase::Setup(_) => panic!("expected a running tournament"),
        }
    }

    #[tokio::test]
    async fn test_save_without_repository() {
        let handle = TournamentActor::spawn(TournamentSettings::new(GameMode::Super8));
        handle.fill(labels(8)).await.unwrap();
        handle.start().await.unwrap();
        assert!(matches!(
            handle.save(Uuid::new_v4(), "x").await,
            Err(SessionError::NoRepository)
        ));
    }

    #[tokio::test]
    async fn test_reset_returns_to_setup() {
        let handle = TournamentActor::spawn(TournamentSettings::new(GameMode::Super8));
        handle.fill(labels(8)).await.unwrap();
        handle.start().await.unwrap();
        handle.reset().await.unwrap();

        let phase = handle.snapshot().await.unwrap();
        assert!(!phase.is_running());
        assert!(phase.labels().iter().all(String::is_empty));
    }

    #[tokio::test]
    async fn test_closed_session() {
        let handle = TournamentActor::spawn(TournamentSettings::new(GameMode::Super8));
        handle.close().await.unwrap();
        // Queued behind Close or sent after the inbox is gone, either way it fails.
        assert!(matches!(handle.ranking().await, Err(SessionError::Closed)));
    }
}
