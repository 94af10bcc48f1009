//! Match-record persistence seam.
//!
//! The engine is a pure state-transition function; loading and saving the
//! record belongs to the surrounding service. `MatchStore` is the seam it
//! plugs into, and `MemoryStore` is the reference implementation the
//! tests use: whole records serialized with `bincode`, last write wins.
//!
//! Callers must serialize actions per match id - at most one in-flight
//! mutation per record at any time. Different matches are independent. If
//! a save fails after the engine produced a new state, retry the whole
//! action against a freshly loaded record; the engine is not idempotent
//! across repeated calls (it spends entity ids and randomness).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::state::MatchState;

/// Identifier for a stored match record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    /// Create a new match ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// Whole-record load/save of match state.
pub trait MatchStore {
    /// Load a match record.
    fn load(&self, id: MatchId) -> Result<MatchState, StoreError>;

    /// Save a match record, replacing any previous version.
    fn save(&mut self, id: MatchId, state: &MatchState) -> Result<(), StoreError>;
}

/// In-memory store over `bincode` blobs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: FxHashMap<MatchId, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MatchStore for MemoryStore {
    fn load(&self, id: MatchId) -> Result<MatchState, StoreError> {
        let bytes = self.records.get(&id).ok_or(StoreError::NotFound)?;
        Ok(bincode::deserialize(bytes)?)
    }

    fn save(&mut self, id: MatchId, state: &MatchState) -> Result<(), StoreError> {
        let bytes = bincode::serialize(state)?;
        self.records.insert(id, bytes);
        Ok(())
    }
}
