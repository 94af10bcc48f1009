//! Effect catalog, dispatcher, and targeting.
//!
//! - `dispatch`: executes one parsed [`crate::keywords::EffectOp`]
//! - `targeting`: the id / slot-index / random fallback ladder
//! - concern modules (`damage`, `heal`, `summon`, `buff`, `control`,
//!   `resource`, `relic`): the primitives the dispatcher composes

pub mod buff;
pub mod control;
pub mod damage;
pub mod dispatch;
pub mod heal;
pub mod relic;
pub mod resource;
pub mod summon;
pub mod targeting;

pub use dispatch::{run_op, MAX_CASCADE_DEPTH};
pub use targeting::{ResolvedTarget, resolve_enemy_or_hero, resolve_in_pool};
