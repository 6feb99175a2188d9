//! Compact binary snapshots of tournament state.

use bincode::config;
use serde::{Serialize, de::DeserializeOwned};

use super::errors::RepositoryResult;

pub fn encode<T: Serialize>(value: &T) -> RepositoryResult<Vec<u8>> {
    Ok(bincode::serde::encode_to_vec(value, config::standard())?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> RepositoryResult<T> {
    let (value, _) = bincode::serde::decode_from_slice(bytes, config::standard())?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::GameMode;
    use crate::tournament::{PairingType, TournamentState};

    #[test]
    fn test_snapshot_preserves_state() {
        let players: Vec<String> = (1..=12).map(|i| format!("P{i}")).collect();
        let mut state =
            TournamentState::start(&players, GameMode::Super12Fixed, PairingType::Manual).unwrap();
        state.advance();
        state.record_match_result(3, 6, 4).unwrap();
        state.record_score(12, -2).unwrap();

        let bytes = encode(&state).unwrap();
        let restored: TournamentState = decode(&bytes).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_truncated_snapshot_fails() {
        let players: Vec<String> = (1..=8).map(|i| format!("P{i}")).collect();
        let state = TournamentState::start(&players, GameMode::Super8, PairingType::Manual).unwrap();
        let bytes = encode(&state).unwrap();
        assert!(decode::<TournamentState>(&bytes[..bytes.len() / 2]).is_err());
    }
}
