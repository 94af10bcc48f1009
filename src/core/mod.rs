//! Core identifiers and utilities: seats, entities, RNG.

mod entity;
mod player;
mod rng;

pub use entity::EntityId;
pub use player::{PerPlayer, PlayerId, PLAYER_COUNT};
pub use rng::{MatchRng, MatchRngState};
