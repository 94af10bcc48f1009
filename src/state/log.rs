//! Structured effect log.
//!
//! The engine appends one entry per observable effect application. The
//! surrounding service broadcasts or archives these for audit and replay;
//! nothing in the rules reads them back.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};

/// Something an effect can point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogTarget {
    Unit(EntityId),
    Hero(PlayerId),
}

/// One observable effect application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEntry {
    TurnStarted {
        side: PlayerId,
        turn: u32,
    },
    Deployed {
        side: PlayerId,
        entity: EntityId,
        slot: Option<usize>,
    },
    SpellCast {
        side: PlayerId,
        entity: EntityId,
    },
    AttackDeclared {
        attacker: EntityId,
        target: LogTarget,
    },
    Damage {
        source: Option<EntityId>,
        target: LogTarget,
        amount: i32,
    },
    ShieldAbsorbed {
        target: EntityId,
    },
    Heal {
        target: LogTarget,
        amount: i32,
    },
    Summoned {
        side: PlayerId,
        entity: EntityId,
        slot: usize,
    },
    Destroyed {
        side: PlayerId,
        entity: EntityId,
    },
    CardDrawn {
        side: PlayerId,
        entity: EntityId,
    },
    CardBurned {
        side: PlayerId,
        entity: EntityId,
    },
    Fatigue {
        side: PlayerId,
        counter: u32,
    },
    Buffed {
        target: EntityId,
        attack: i32,
        health: i32,
    },
    Frozen {
        target: EntityId,
        turns: u32,
    },
    Silenced {
        target: EntityId,
    },
    RelicDestroyed {
        side: PlayerId,
        entity: EntityId,
    },
    ManaGained {
        side: PlayerId,
        amount: i32,
    },
    MatchEnded {
        winner: PlayerId,
    },
}
