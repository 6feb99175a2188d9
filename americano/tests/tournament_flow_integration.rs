//! End-to-end tournament flows through the public API.

#[cfg(test)]
mod flow_tests {
    use americano::{
        GameMode, PairingType, ScoringModel, TournamentError, TournamentPhase, TournamentSettings,
        TournamentState,
        tournament::{PhaseOverview, RosterDraw},
    };
    use rand::{SeedableRng, rngs::StdRng};

    fn labels(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_eight_player_tournament() {
        let mut state =
            TournamentState::start(&labels("P", 8), GameMode::Super8, PairingType::Manual)
                .unwrap();

        let courts = state.current_matches();
        assert_eq!(courts[0].labels(), vec!["P1", "P2", "P3", "P4"]);
        assert_eq!(courts[1].labels(), vec!["P5", "P6", "P7", "P8"]);

        // Every slot scores its own number each round.
        for round in 0..7 {
            assert_eq!(state.current_round_index(), round);
            for slot in 1..=8 {
                state.record_score(slot, slot as i64).unwrap();
            }
            state.advance();
        }

        assert_eq!(state.current_round().unwrap().number(), 7);
        state.advance();
        assert_eq!(state.current_round().unwrap().number(), 7);

        let ranking = state.ranking();
        let order: Vec<&str> = ranking.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(order, vec!["P8", "P7", "P6", "P5", "P4", "P3", "P2", "P1"]);
        assert!(ranking.windows(2).all(|w| w[0].score > w[1].score));
        assert_eq!(ranking[0].score, 56);
        assert_eq!(ranking[0].position, 1);
    }

    #[test]
    fn test_court_results_drive_ranking() {
        let mut state =
            TournamentState::start(&labels("P", 8), GameMode::Super8, PairingType::Manual)
                .unwrap();

        // Round 1: P1+P2 beat P3+P4, P7+P8 beat P5+P6.
        state.record_match_result(1, 6, 2).unwrap();
        state.record_match_result(2, 1, 6).unwrap();
        state.advance();
        // Round 2: P1+P3 vs P2+P5.
        state.record_match_result(1, 6, 5).unwrap();

        let score = |label: &str| {
            state
                .ranking()
                .into_iter()
                .find(|e| e.label == label)
                .map(|e| e.score)
        };
        assert_eq!(score("P1"), Some(12));
        assert_eq!(score("P2"), Some(11));
        assert_eq!(score("P3"), Some(8));
        assert_eq!(score("P5"), Some(6));
        assert_eq!(state.ranking()[0].label, "P1");
    }

    #[test]
    fn test_wins_scoring_over_fixed_pairs() {
        let settings = TournamentSettings::new(GameMode::Super8Fixed).with_scoring(ScoringModel::Wins);
        let mut state = TournamentState::begin(
            &labels("Pair ", 8),
            settings,
            &mut RosterDraw::new(),
        )
        .unwrap();

        for _ in 0..7 {
            // The lower slot on each court wins.
            for court in 1..=4 {
                state.record_match_result(court, 6, 3).unwrap();
            }
            state.advance();
        }

        let ranking = state.ranking();
        let total: i64 = ranking.iter().map(|e| e.score).sum();
        assert_eq!(total, 28);
        assert_eq!(ranking[0].label, "Pair 1");
        assert_eq!(ranking[0].score, 7);
        assert_eq!(ranking.last().unwrap().score, 0);
    }

    #[test]
    fn test_invalid_slot_is_reported() {
        let mut state = TournamentState::start(
            &labels("T", 12),
            GameMode::Super12Fixed,
            PairingType::Manual,
        )
        .unwrap();
        assert_eq!(
            state.record_score(13, 1),
            Err(TournamentError::InvalidSlot {
                slot: 13,
                roster_len: 12
            })
        );
    }

    #[test]
    fn test_random_draw_keeps_everyone() {
        let settings =
            TournamentSettings::new(GameMode::Super12).with_pairing(PairingType::Random);
        let mut draw = RosterDraw::with_rng(StdRng::seed_from_u64(2024));
        let state = TournamentState::begin(&labels("P", 12), settings, &mut draw).unwrap();

        let mut seen: Vec<String> = state
            .current_matches()
            .iter()
            .flat_map(|court| court.labels())
            .map(str::to_string)
            .collect();
        seen.sort();
        let mut expected = labels("P", 12);
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_phase_lifecycle() {
        let mut phase = TournamentPhase::new(TournamentSettings::new(GameMode::Super6Fixed));
        for (slot, label) in labels("Pair ", 5).into_iter().enumerate() {
            phase.set_entry(slot + 1, label).unwrap();
        }
        assert!(phase.readiness().unwrap().is_err());
        assert!(phase.start(&mut RosterDraw::new()).is_err());

        phase.set_entry(6, "Pair 6").unwrap();
        assert!(phase.readiness().unwrap().is_ok());
        phase.start(&mut RosterDraw::new()).unwrap();
        assert!(phase.is_running());

        phase.running_mut().unwrap().record_match_result(3, 2, 6).unwrap();
        assert_eq!(phase.running().unwrap().ranking()[0].label, "Pair 6");

        phase.reset();
        assert!(!phase.is_running());
        assert_eq!(phase.running().unwrap_err(), TournamentError::NotStarted);
    }

    #[test]
    fn test_state_survives_json() {
        let mut state =
            TournamentState::start(&labels("P", 8), GameMode::Super8, PairingType::Manual)
                .unwrap();
        state.advance();
        state.record_match_result(2, 4, 6).unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let restored: TournamentState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
        restored.check_consistency().unwrap();
        assert!(json.contains("\"super8\""));
    }
}
