//! Modifier calculator - read-time aura math.
//!
//! Auras from structures and relics are never written into unit stats.
//! `effective_attack` and `effective_damage` recompute them from the board
//! on every call, so repeated reads can never double-apply a bonus, and a
//! carrier leaving the board (or being silenced - silence empties its
//! keyword list) takes its contribution with it immediately.
//!
//! Permanent buff effects (`Battlecry:BuffAllies+1+1` and friends) are the
//! contrast: they mutate stored `attack`/`max_hp` once and stack additively
//! under whatever the calculator later adds on top.

use crate::core::PlayerId;
use crate::keywords::{Aura, Keyword};
use crate::state::{CardInstance, MatchState};

/// A unit's attack for this moment: stored attack plus every matching
/// attack aura on its own side. Returns 0 for an empty slot.
#[must_use]
pub fn effective_attack(state: &MatchState, side: PlayerId, slot: usize) -> i32 {
    let Some(unit) = state.side(side).unit(slot) else {
        return 0;
    };

    let mut attack = unit.attack;
    for carrier in aura_carriers(state, side) {
        for keyword in &carrier.keywords {
            if let Keyword::Aura(aura) = keyword {
                attack += attack_bonus(aura, unit);
            }
        }
    }
    attack.max(0)
}

/// Incoming damage after the target side's reduction auras.
///
/// Reduction can never fully negate a hit: any positive raw damage lands
/// for at least 1. Non-positive raw damage stays 0.
#[must_use]
pub fn effective_damage(state: &MatchState, target_side: PlayerId, raw: i32) -> i32 {
    if raw <= 0 {
        return 0;
    }

    let mut reduction = 0;
    for carrier in aura_carriers(state, target_side) {
        for keyword in &carrier.keywords {
            if let Keyword::Aura(Aura::DamageReduction { amount }) = keyword {
                reduction += amount;
            }
        }
    }
    (raw - reduction).max(1)
}

/// Battlefield entities (slot order) then relics (list order).
fn aura_carriers(state: &MatchState, side: PlayerId) -> impl Iterator<Item = &CardInstance> {
    let side = state.side(side);
    side.occupied_slots()
        .map(|(_, c)| c)
        .chain(side.relics.iter())
}

fn attack_bonus(aura: &Aura, unit: &CardInstance) -> i32 {
    match aura {
        Aura::TribeAttack { element, bonus } => {
            if unit.element == Some(*element) {
                *bonus
            } else {
                0
            }
        }
        Aura::AllAttack { bonus } => *bonus,
        Aura::DamageReduction { .. } => 0,
    }
}
