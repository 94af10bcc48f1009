//! Effect vocabulary.
//!
//! `EffectOp` is the shared payload of every effectful keyword category:
//! a Battlecry, Deathrattle, Spell, or lifecycle trigger all name one of
//! these operations. Static auras and per-turn auras get their own smaller
//! vocabularies because they are evaluated differently (read-time vs
//! turn-boundary).

use serde::{Deserialize, Serialize};

use crate::state::Element;

/// An atomic game operation, dispatched by the effect resolver.
///
/// Ops that take an optional target fall back per the targeting rules:
/// explicit id, then slot index, then random, then (for damage) the enemy
/// hero. "Conditional" ops participate in the chain-boolean protocol: a
/// `ConditionalRelicDestroy` reports whether it destroyed anything, and a
/// later `ConditionalBuff` in the same keyword list consumes that report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOp {
    // === Damage ===
    /// Damage a resolved enemy entity; hero redirect on an empty board.
    Damage(i32),
    /// Damage the enemy hero directly.
    DamageHero(i32),
    /// Damage every enemy battlefield entity.
    DamageAllEnemies(i32),
    /// Damage every battlefield entity on both sides.
    DamageAllUnits(i32),
    /// Damage one random enemy entity; hero redirect on an empty board.
    DamageRandomEnemy(i32),

    // === Healing ===
    /// Heal a resolved friendly entity; falls back to own hero.
    Heal(i32),
    /// Heal own hero.
    HealHero(i32),
    /// Heal every friendly battlefield entity and the hero.
    HealAllAllies(i32),

    // === Resources ===
    /// Draw cards (fatigue/burn rules apply).
    Draw(u32),
    /// Gain temporary mana this turn.
    GainMana(i32),

    // === Summoning ===
    /// Put token units into the lowest-index empty slots.
    SummonToken {
        name: String,
        attack: i32,
        health: i32,
        count: u32,
    },

    // === Permanent buffs ===
    /// Buff the source entity itself.
    BuffSelf { attack: i32, health: i32 },
    /// Buff a resolved friendly entity.
    BuffTarget { attack: i32, health: i32 },
    /// Buff every friendly battlefield entity.
    BuffAllies { attack: i32, health: i32 },
    /// Buff one random friendly battlefield entity.
    BuffRandomAlly { attack: i32, health: i32 },
    /// Grant Divine Shield to a resolved friendly entity.
    GiveDivineShield,

    // === Control ===
    /// Freeze a resolved enemy unit.
    FreezeTarget { turns: u32 },
    /// Freeze the damage source (OnDamageTaken retaliation).
    FreezeAttacker { turns: u32 },
    /// Strip a resolved enemy unit's keywords, shield, and freeze.
    Silence,
    /// Destroy a resolved enemy unit outright.
    DestroyTarget,

    // === Conditional chains ===
    /// Destroy the enemy's first (lowest-index) relic; reports success.
    ConditionalRelicDestroy,
    /// Buff the source if the previous op in the list reported success.
    ConditionalBuff { attack: i32, health: i32 },
}

/// A static aura carried by a structure or relic.
///
/// Auras are never written into unit stats; the modifier calculator reads
/// them fresh at every use site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aura {
    /// Attack bonus for friendly units of one element.
    TribeAttack { element: Element, bonus: i32 },
    /// Attack bonus for every friendly unit.
    AllAttack { bonus: i32 },
    /// Flat reduction of incoming damage to this side (floored at 1).
    DamageReduction { amount: i32 },
}

/// A per-turn aura carried by a structure or relic, run at the owner's
/// turn start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAura {
    /// Heal own hero.
    HealHero(i32),
    /// Ping one random enemy entity; hero redirect on an empty board.
    PingRandomEnemy(i32),
    /// Permanently grow max mana every `period` turns.
    ManaRampCycle { period: u32 },
    /// Buff one random friendly battlefield entity.
    RandomAllyBuff { attack: i32, health: i32 },
}
