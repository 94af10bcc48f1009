//! The match record: everything the engine reads and writes.
//!
//! One `MatchState` is exclusively owned by the controller for the duration
//! of one action. It serializes as a whole (including the RNG position) for
//! whole-record persistence, and its collections use `im` vectors where the
//! record grows monotonically so snapshots stay cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::log::LogEntry;
use super::side::PlayerSide;
use crate::core::{EntityId, MatchRng, PerPlayer, PlayerId};
use crate::controller::ActionRecord;

/// Where the active player is within their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Cards may be deployed or cast; no attack declared yet.
    Deploying,
    /// An attack has been declared; deployment is closed for the turn.
    Combat,
    /// Turn started with an empty battlefield and a deployable unit in
    /// hand; the side should redeploy before anything else.
    WaitingRedeploy,
    /// The match is over; no action is legal.
    GameOver,
}

/// Whether the match is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress,
    Finished,
}

/// Full match state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    /// Both sides, indexed by seat.
    pub sides: PerPlayer<PlayerSide>,

    /// Turn counter; increments on every end-turn.
    pub turn_number: u32,

    /// Whose turn it is.
    pub active_player: PlayerId,

    pub phase: Phase,
    pub status: MatchStatus,

    /// Set exactly once, when a hero first reaches 0 hp.
    pub winner: Option<PlayerId>,

    /// Structured effect log for the caller's audit/replay pipeline.
    pub log: Vector<LogEntry>,

    /// One record per applied action.
    pub history: Vector<ActionRecord>,

    /// Match-owned RNG; serialized with the record.
    pub rng: MatchRng,

    next_entity_id: u32,
}

impl MatchState {
    /// Create an empty match shell. Use [`crate::controller::MatchBuilder`]
    /// for a playable setup.
    #[must_use]
    pub fn new(sides: PerPlayer<PlayerSide>, seed: u64) -> Self {
        Self {
            sides,
            turn_number: 1,
            active_player: PlayerId::new(0),
            phase: Phase::Deploying,
            status: MatchStatus::InProgress,
            winner: None,
            log: Vector::new(),
            history: Vector::new(),
            rng: MatchRng::new(seed),
            next_entity_id: EntityId::FIRST,
        }
    }

    /// Allocate a fresh entity id.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Bump the allocator past ids assigned externally (deck construction).
    pub fn reserve_entities(&mut self, highest_used: u32) {
        if highest_used >= self.next_entity_id {
            self.next_entity_id = highest_used + 1;
        }
    }

    /// One side of the match.
    #[must_use]
    pub fn side(&self, player: PlayerId) -> &PlayerSide {
        &self.sides[player]
    }

    /// Mutable access to one side.
    pub fn side_mut(&mut self, player: PlayerId) -> &mut PlayerSide {
        &mut self.sides[player]
    }

    /// Locate a battlefield entity anywhere on the board.
    #[must_use]
    pub fn find_unit(&self, id: EntityId) -> Option<(PlayerId, usize)> {
        for player in PlayerId::both() {
            if let Some(slot) = self.sides[player].find_unit(id) {
                return Some((player, slot));
            }
        }
        None
    }

    /// Append a structured log entry.
    pub fn log_event(&mut self, entry: LogEntry) {
        self.log.push_back(entry);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Latch the win condition. Called after every hero-hp-affecting
    /// operation; the first hero at 0 loses and later changes cannot
    /// overwrite the result.
    pub fn update_win_condition(&mut self) {
        if self.is_finished() {
            return;
        }
        for player in PlayerId::both() {
            if self.sides[player].hero.hp <= 0 {
                let winner = player.opponent();
                self.status = MatchStatus::Finished;
                self.winner = Some(winner);
                self.phase = Phase::GameOver;
                self.log_event(LogEntry::MatchEnded { winner });
                return;
            }
        }
    }
}
