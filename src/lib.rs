//! # duelcore
//!
//! Rules engine for a turn-based, two-player trading-card battle game:
//! card deployment, combat, spell casting, and time-based triggers
//! resolved against a shared match state.
//!
//! ## Design Principles
//!
//! 1. **Pure state transition**: `apply_action(&mut MatchState, Action)`
//!    runs one player action start to finish, synchronously, cascades
//!    included. No suspension points, no internal retry, no globals.
//!
//! 2. **Parse once**: card behavior is authored as
//!    `Category:EffectName[Params]` keyword strings and parsed into a
//!    tagged enum at card-load time. Unknown identifiers drop silently -
//!    forward compatibility with new content is a feature, not an error.
//!
//! 3. **Every branch has a fallback**: missing targets redirect or
//!    fizzle, overdraws burn, empty-deck draws become fatigue, full-board
//!    summons skip. The only failure path is pre-mutation validation.
//!
//! ## Modules
//!
//! - `core`: seats, entity ids, RNG
//! - `state`: the match record (heroes, hands, decks, slots, relics, log)
//! - `keywords`: the keyword DSL and its parser
//! - `catalog`: static card definitions
//! - `effects`: effect dispatcher, targeting, damage/heal/summon/... ops
//! - `modifiers`: read-time aura math
//! - `triggers`: lifecycle hooks and turn auras
//! - `combat`: the attack state machine
//! - `controller`: action validation, turn flow, win condition
//! - `store`: match-record persistence seam

pub mod catalog;
pub mod combat;
pub mod controller;
pub mod core;
pub mod effects;
pub mod error;
pub mod keywords;
pub mod modifiers;
pub mod state;
pub mod store;
pub mod triggers;

// Re-export the types a caller needs to run a match.
pub use crate::core::{EntityId, MatchRng, MatchRngState, PerPlayer, PlayerId};

pub use crate::state::{
    CardInstance, CardType, DrawOutcome, Element, Hero, LogEntry, LogTarget, MatchState,
    MatchStatus, Phase, PlayerSide, BATTLEFIELD_SLOTS, HAND_LIMIT, MANA_CAP,
};

pub use crate::catalog::{starter_set, CardCatalog, CardDefinition, CardId};

pub use crate::keywords::{parse_keyword, Aura, EffectOp, Keyword, KeywordList, TurnAura};

pub use crate::combat::AttackTarget;

pub use crate::controller::{apply_action, Action, ActionRecord, MatchBuilder};

pub use crate::error::{ActionError, StoreError};

pub use crate::store::{MatchId, MatchStore, MemoryStore};

pub use crate::modifiers::{effective_attack, effective_damage};
