//! Counter-based deterministic random stream.
//!
//! A run is keyed by a string seed. The Nth draw is a pure function of the
//! seed and N, so replays reproduce every value as long as the same number of
//! draws happen in the same order. Draws advance a counter stored in state.

use sha2::{Digest, Sha256};

use crate::state::GameState;

/// Seed plus draw counter, stored in [`GameState`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngState {
    pub seed: String,
    pub counter: u64,
}

impl RngState {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            counter: 0,
        }
    }

    /// Value of the draw `offset` positions ahead, without consuming it.
    pub fn peek(&self, offset: u64) -> f64 {
        let key = stream_key(&self.seed);
        unit_interval(PcgRng::next_u32(compute_seed(key, self.counter.wrapping_add(offset))))
    }

    /// Consumes the next draw.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.peek(0);
        self.counter += 1;
        value
    }

    /// Consumes the next draw as an index into `0..len`. Returns 0 when `len`
    /// is 0 or 1 without consuming a draw.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// Draws the next value in `[0, 1)` and returns it with the advanced state.
pub fn consume_random(mut state: GameState) -> (f64, GameState) {
    let value = state.rng.next_f64();
    (value, state)
}

/// Value `offset` draws ahead of the current counter. Providers use this to
/// preview draws they declare through `rng_consumption`; the loop consumes
/// them after execution.
pub fn peek_random(rng: &RngState, offset: u64) -> f64 {
    rng.peek(offset)
}

/// Folds the string seed into a 64-bit stream key.
fn stream_key(seed: &str) -> u64 {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

fn unit_interval(value: u32) -> f64 {
    f64::from(value) / 4_294_967_296.0
}

/// PCG-XSH-RR: one LCG step followed by the xorshift/rotate permutation.
struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_u32(seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the stream key with the draw counter (SplitMix64 / murmur finalizer).
fn compute_seed(key: u64, counter: u64) -> u64 {
    let mut hash = key;
    hash ^= counter.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
