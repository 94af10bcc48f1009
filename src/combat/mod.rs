//! Combat resolver - the attack state machine.
//!
//! One declared attack walks: pre-attack triggers, shield check and
//! damage exchange, post-damage effects (lifesteal, poison), the
//! defender's counter-attack, death checks and Deathrattles, an optional
//! Double Strike repeat, and after-attack triggers. Death checks are not
//! a terminal step: they run inside every damage application, so an
//! entity that dies mid-exchange participates in nothing further - a dead
//! defender does not counter, a dead attacker gets no second hit.
//!
//! `effective_attack` is computed fresh for every hit: auras may have
//! changed since deployment, and pre-attack triggers may have buffed the
//! attacker.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};
use crate::effects::{damage, heal};
use crate::modifiers;
use crate::state::{LogEntry, LogTarget, MatchState};
use crate::triggers::scheduler;

/// What an attack was declared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    /// An enemy battlefield entity.
    Unit(EntityId),
    /// The enemy hero.
    Hero,
}

/// Resolve one validated attack to completion.
///
/// The controller has already checked legality (phase, readiness, Taunt);
/// from here on everything is consequence, not validation.
pub fn resolve_attack(
    state: &mut MatchState,
    side: PlayerId,
    attacker: EntityId,
    target: AttackTarget,
) {
    let target_spec = match target {
        AttackTarget::Unit(id) => Some(id.raw()),
        AttackTarget::Hero => None,
    };
    state.log_event(LogEntry::AttackDeclared {
        attacker,
        target: match target {
            AttackTarget::Unit(id) => LogTarget::Unit(id),
            AttackTarget::Hero => LogTarget::Hero(side.opponent()),
        },
    });

    scheduler::fire_on_attack(state, side, attacker, target_spec, 0);

    // Pre-attack triggers may have removed the attacker (self-damage
    // cascades); a gone attacker swings at nothing.
    let Some((owner, slot)) = state.find_unit(attacker) else {
        return;
    };
    if let Some(unit) = state.side_mut(owner).unit_mut(slot) {
        unit.has_attacked_this_turn = true;
    }

    perform_hit(state, side, attacker, target, true);

    // Double Strike: one repeat against the same target, no counter, and
    // only while both parties are still standing.
    let double_strike = state
        .find_unit(attacker)
        .and_then(|(o, s)| state.side(o).unit(s))
        .is_some_and(|u| u.has_double_strike());
    if double_strike && target_alive(state, target) && !state.is_finished() {
        perform_hit(state, side, attacker, target, false);
    }

    if state.find_unit(attacker).is_some() && !state.is_finished() {
        scheduler::fire_after_attack(state, side, attacker, target_spec, 0);
    }
}

fn target_alive(state: &MatchState, target: AttackTarget) -> bool {
    match target {
        AttackTarget::Unit(id) => state.find_unit(id).is_some(),
        AttackTarget::Hero => !state.is_finished(),
    }
}

/// One full damage exchange: attacker hits, post-damage effects land,
/// defender counters (when allowed and still alive).
fn perform_hit(
    state: &mut MatchState,
    side: PlayerId,
    attacker: EntityId,
    target: AttackTarget,
    allow_counter: bool,
) {
    let Some((owner, slot)) = state.find_unit(attacker) else {
        return;
    };
    let power = modifiers::effective_attack(state, owner, slot);

    match target {
        AttackTarget::Hero => {
            let dealt = damage::damage_hero(state, side.opponent(), Some(attacker), power);
            post_damage_effects(state, side, attacker, None, dealt);
        }
        AttackTarget::Unit(defender) => {
            let Some((def_side, def_slot)) = state.find_unit(defender) else {
                return;
            };
            let dealt = damage::damage_unit(state, def_side, def_slot, Some(attacker), power, 0);
            post_damage_effects(state, side, attacker, Some(defender), dealt);

            // Counter-attack: bidirectional damage unless this is the
            // second Double Strike hit. A defender that died (or was
            // never a unit with attack) counters with nothing.
            if allow_counter {
                counter_attack(state, defender, attacker);
            }
        }
    }
}

/// Lifesteal and poison for whoever just dealt damage.
fn post_damage_effects(
    state: &mut MatchState,
    dealer_side: PlayerId,
    dealer: EntityId,
    victim: Option<EntityId>,
    dealt: i32,
) {
    if dealt <= 0 {
        return;
    }
    let Some((owner, slot)) = state.find_unit(dealer) else {
        return;
    };
    let (lifesteal, poison) = {
        let unit = state.side(owner).unit(slot).expect("found above");
        (unit.has_lifesteal(), unit.has_poison())
    };

    // Lifesteal heals by the damage actually dealt, not the raw swing.
    if lifesteal {
        heal::heal_hero_event(state, dealer_side, dealt, 0);
    }

    // Poison forces lethality on units only; the displayed damage figure
    // was already logged by the damage pipeline.
    if poison {
        if let Some(victim) = victim {
            if let Some((v_side, v_slot)) = state.find_unit(victim) {
                damage::force_kill(state, v_side, v_slot, 0);
            }
        }
    }
}

fn counter_attack(state: &mut MatchState, defender: EntityId, attacker: EntityId) {
    // Both must still be on the board; death anywhere in the exchange
    // removes a participant from every further step.
    let Some((def_side, def_slot)) = state.find_unit(defender) else {
        return;
    };
    let Some((atk_side, atk_slot)) = state.find_unit(attacker) else {
        return;
    };

    let power = modifiers::effective_attack(state, def_side, def_slot);
    let dealt = damage::damage_unit(state, atk_side, atk_slot, Some(defender), power, 0);
    post_damage_effects(state, def_side, defender, Some(attacker), dealt);
}
