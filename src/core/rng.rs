//! Random number generation for match resolution.
//!
//! Random targeting, token rolls, and deck shuffles all draw from one
//! `MatchRng` owned by the match state. The engine makes no determinism
//! promise to callers — seeds normally come from entropy — but the RNG
//! state serializes with the match record, so a persisted match resumes
//! with the stream it left with rather than a fresh one.

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use rand_chacha::ChaCha8Rng;

/// Match-owned RNG.
///
/// Uses ChaCha8 for speed while keeping an O(1)-serializable state
/// (seed plus stream position, independent of how many values have
/// been drawn).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "MatchRngState", from = "MatchRngState")]
pub struct MatchRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl MatchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> MatchRngState {
        MatchRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &MatchRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl From<MatchRng> for MatchRngState {
    fn from(rng: MatchRng) -> Self {
        rng.state()
    }
}

impl From<MatchRngState> for MatchRng {
    fn from(state: MatchRngState) -> Self {
        Self::from_state(&state)
    }
}

/// Serializable RNG state for whole-record persistence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}
