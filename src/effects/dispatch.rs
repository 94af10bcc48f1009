//! Effect dispatch.
//!
//! One entry point, [`run_op`], executes a single parsed effect operation
//! against the match state. The trigger scheduler and the match controller
//! both funnel through here, so every op resolves targets, logs, and
//! cascades the same way regardless of which keyword category carried it.
//!
//! ## The chain boolean
//!
//! Ops inside one keyword list run in list order, and each op's boolean
//! result becomes the `chain` input of the next. Most ops report "did
//! anything happen"; `ConditionalRelicDestroy` reports whether a relic
//! died, and `ConditionalBuff` consumes the incoming chain to decide
//! whether to fire at all.
//!
//! ## Recursion
//!
//! Ops may cascade (damage kills a unit, whose Deathrattle summons or
//! damages further). Cascades recurse directly and are capped at
//! [`MAX_CASCADE_DEPTH`]; an op asked to run past the cap is skipped and
//! passes its chain input through unchanged.

use crate::core::{EntityId, PlayerId};
use crate::keywords::EffectOp;
use crate::state::MatchState;

use super::targeting::{self, ResolvedTarget};
use super::{buff, control, damage, heal, relic, resource, summon};

/// Upper bound on trigger cascade depth. Content cannot legitimately get
/// anywhere near this; the cap guards against authoring bugs.
pub const MAX_CASCADE_DEPTH: u32 = 50;

/// Execute one effect operation.
///
/// `side` is the effect owner's seat, `source` the entity whose keyword
/// carried the op (it may already have left the board - Deathrattles run
/// after removal). `target_spec` is the explicit target identifier from
/// the action, or the damage source for OnDamageTaken triggers.
///
/// Returns the op's chain result.
pub fn run_op(
    state: &mut MatchState,
    side: PlayerId,
    source: EntityId,
    target_spec: Option<u32>,
    op: &EffectOp,
    chain: bool,
    depth: u32,
) -> bool {
    if depth > MAX_CASCADE_DEPTH || state.is_finished() {
        // Past the cap (or after the match ended) effects stop landing;
        // pass the chain through so later conditionals stay consistent.
        return chain;
    }
    let enemy = side.opponent();

    match op {
        // === Damage ===
        EffectOp::Damage(amount) => {
            match targeting::resolve_enemy_or_hero(state, side, target_spec) {
                ResolvedTarget::Unit(slot) => {
                    damage::damage_unit(state, enemy, slot, Some(source), *amount, depth) > 0
                }
                ResolvedTarget::Hero => damage::damage_hero(state, enemy, Some(source), *amount) > 0,
            }
        }
        EffectOp::DamageHero(amount) => {
            damage::damage_hero(state, enemy, Some(source), *amount) > 0
        }
        EffectOp::DamageAllEnemies(amount) => {
            let victims: Vec<EntityId> =
                targeting::enemy_board(state, side).iter().map(|(_, id)| *id).collect();
            damage::damage_each(state, &victims, Some(source), *amount, depth) > 0
        }
        EffectOp::DamageAllUnits(amount) => {
            let mut victims: Vec<EntityId> =
                targeting::enemy_board(state, side).iter().map(|(_, id)| *id).collect();
            victims.extend(targeting::ally_board(state, side).iter().map(|(_, id)| *id));
            damage::damage_each(state, &victims, Some(source), *amount, depth) > 0
        }
        EffectOp::DamageRandomEnemy(amount) => {
            match targeting::resolve_enemy_or_hero(state, side, None) {
                ResolvedTarget::Unit(slot) => {
                    damage::damage_unit(state, enemy, slot, Some(source), *amount, depth) > 0
                }
                ResolvedTarget::Hero => damage::damage_hero(state, enemy, Some(source), *amount) > 0,
            }
        }

        // === Healing ===
        EffectOp::Heal(amount) => {
            let pool = targeting::ally_board(state, side);
            let healed = match targeting::resolve_in_pool(state, target_spec, &pool) {
                Some(slot) => heal::heal_unit_raw(state, side, slot, *amount),
                // Empty board: the heal falls back to the hero.
                None => heal::heal_hero_raw(state, side, *amount),
            };
            heal::finish_heal_event(state, side, healed, depth);
            healed > 0
        }
        EffectOp::HealHero(amount) => heal::heal_hero_event(state, side, *amount, depth) > 0,
        EffectOp::HealAllAllies(amount) => {
            let slots: Vec<usize> =
                targeting::ally_board(state, side).iter().map(|(slot, _)| *slot).collect();
            let mut healed = 0;
            for slot in slots {
                healed += heal::heal_unit_raw(state, side, slot, *amount);
            }
            healed += heal::heal_hero_raw(state, side, *amount);
            heal::finish_heal_event(state, side, healed, depth);
            healed > 0
        }

        // === Resources ===
        EffectOp::Draw(count) => resource::draw_cards(state, side, *count) > 0,
        EffectOp::GainMana(amount) => {
            resource::gain_mana(state, side, *amount);
            true
        }

        // === Summoning ===
        EffectOp::SummonToken {
            name,
            attack,
            health,
            count,
        } => summon::summon_token(state, side, name, *attack, *health, *count) > 0,

        // === Permanent buffs ===
        EffectOp::BuffSelf { attack, health } => match state.find_unit(source) {
            Some((owner, slot)) => buff::buff_unit(state, owner, slot, *attack, *health),
            None => false,
        },
        EffectOp::BuffTarget { attack, health } => {
            let pool = targeting::ally_board(state, side);
            match targeting::resolve_in_pool(state, target_spec, &pool) {
                Some(slot) => buff::buff_unit(state, side, slot, *attack, *health),
                None => false,
            }
        }
        EffectOp::BuffAllies { attack, health } => {
            buff::buff_all(state, side, *attack, *health) > 0
        }
        EffectOp::BuffRandomAlly { attack, health } => {
            let pool = targeting::ally_board(state, side);
            match targeting::resolve_in_pool(state, None, &pool) {
                Some(slot) => buff::buff_unit(state, side, slot, *attack, *health),
                None => false,
            }
        }
        EffectOp::GiveDivineShield => {
            let pool = targeting::ally_board(state, side);
            match targeting::resolve_in_pool(state, target_spec, &pool) {
                Some(slot) => buff::give_divine_shield(state, side, slot),
                None => false,
            }
        }

        // === Control ===
        EffectOp::FreezeTarget { turns } => {
            let pool = targeting::enemy_board(state, side);
            match targeting::resolve_in_pool(state, target_spec, &pool) {
                Some(slot) => control::freeze_unit(state, enemy, slot, *turns),
                // No enemy entities: a freeze has nothing to grip.
                None => false,
            }
        }
        EffectOp::FreezeAttacker { turns } => {
            control::freeze_attacker(state, target_spec.map(EntityId::new), *turns)
        }
        EffectOp::Silence => {
            let pool = targeting::enemy_board(state, side);
            match targeting::resolve_in_pool(state, target_spec, &pool) {
                Some(slot) => control::silence_unit(state, enemy, slot),
                None => false,
            }
        }
        EffectOp::DestroyTarget => {
            let pool = targeting::enemy_board(state, side);
            match targeting::resolve_in_pool(state, target_spec, &pool) {
                Some(slot) => control::destroy_unit(state, enemy, slot, depth),
                None => false,
            }
        }

        // === Conditional chains ===
        EffectOp::ConditionalRelicDestroy => relic::destroy_first_relic(state, enemy),
        EffectOp::ConditionalBuff { attack, health } => {
            if !chain {
                return false;
            }
            match state.find_unit(source) {
                Some((owner, slot)) => buff::buff_unit(state, owner, slot, *attack, *health),
                None => false,
            }
        }
    }
}
