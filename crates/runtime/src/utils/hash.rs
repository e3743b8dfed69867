//! Hashing utilities for game state.
//!
//! Digests cover the canonical state only: the per-call side-channel lists
//! are stripped first, so two runs that agree on the rules agree on the hash.

use hexbound_core::GameState;
use sha2::{Digest, Sha256};

/// SHA-256 of the bincode encoding of `state` without its side channel,
/// hex-encoded.
pub fn hash_game_state(state: &GameState) -> Result<String, bincode::Error> {
    let bytes = bincode::serialize(&state.without_side_channel())?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// First 16 hex characters of the digest, for compact logging.
pub fn short_hash(digest: &str) -> &str {
    digest.get(..16).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use hexbound_core::state::{Actor, ActorId, Faction, GridBounds, Point, TileGrid, VisualEvent};
    use hexbound_core::GameConfig;

    use super::*;

    fn state(seed: &str) -> GameState {
        let player = Actor::new(ActorId::PLAYER, "Hoplite", Faction::Player, Point::new(1, 1))
            .with_hp(3);
        GameState::new(
            seed,
            player,
            TileGrid::new(GridBounds::new(5, 5)),
            &GameConfig::default(),
        )
    }

    #[test]
    fn hash_is_stable_and_hex() {
        let digest = hash_game_state(&state("a")).unwrap();
        assert_eq!(digest, hash_game_state(&state("a")).unwrap());
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(short_hash(&digest).len(), 16);
    }

    #[test]
    fn side_channel_does_not_change_the_hash() {
        let plain = state("a");
        let mut noisy = plain.clone();
        noisy.visual_events.push(VisualEvent::Shake { intensity: 3 });
        assert_eq!(
            hash_game_state(&plain).unwrap(),
            hash_game_state(&noisy).unwrap()
        );
        assert_ne!(
            hash_game_state(&plain).unwrap(),
            hash_game_state(&state("b")).unwrap()
        );
    }
}
