//! Damage pipeline and death resolution.
//!
//! Every point of damage in the engine - combat hits, counter-attacks,
//! spell damage, AoE, pings, thorns - lands through [`damage_unit`] or
//! [`damage_hero`], so Divine Shield, reduction auras, OnDamageTaken
//! triggers, death sweeps, and the win-condition latch behave identically
//! no matter who asked for the damage.

use crate::core::{EntityId, PlayerId};
use crate::modifiers;
use crate::state::{LogEntry, LogTarget, MatchState};
use crate::triggers::scheduler;

/// Damage one battlefield entity. Returns the damage actually dealt
/// (0 for an absorbed or empty hit).
///
/// Pipeline: reduction auras, Divine Shield, hp, OnDamageTaken trigger
/// (survivors only), death sweep.
pub fn damage_unit(
    state: &mut MatchState,
    target_side: PlayerId,
    slot: usize,
    source: Option<EntityId>,
    raw: i32,
    depth: u32,
) -> i32 {
    if raw <= 0 {
        return 0;
    }
    let effective = modifiers::effective_damage(state, target_side, raw);

    let Some(unit) = state.side_mut(target_side).unit_mut(slot) else {
        return 0;
    };
    let target_id = unit.id;

    if unit.has_divine_shield {
        unit.has_divine_shield = false;
        state.log_event(LogEntry::ShieldAbsorbed { target: target_id });
        return 0;
    }

    unit.current_hp -= effective;
    let survived = unit.current_hp > 0;
    state.log_event(LogEntry::Damage {
        source,
        target: LogTarget::Unit(target_id),
        amount: effective,
    });

    if survived {
        scheduler::fire_on_damage_taken(state, target_side, slot, source, depth + 1);
    }
    resolve_deaths(state, depth);

    effective
}

/// Damage a hero. Returns the damage dealt. Recomputes the win condition
/// immediately, before any caller-side follow-up runs.
pub fn damage_hero(
    state: &mut MatchState,
    target_side: PlayerId,
    source: Option<EntityId>,
    raw: i32,
) -> i32 {
    if raw <= 0 {
        return 0;
    }
    let effective = modifiers::effective_damage(state, target_side, raw);

    state.side_mut(target_side).hero.hp -= effective;
    state.log_event(LogEntry::Damage {
        source,
        target: LogTarget::Hero(target_side),
        amount: effective,
    });
    state.update_win_condition();

    effective
}

/// Kill a battlefield entity outright, bypassing the damage math (poison
/// lethality, destroy effects). The death sweep runs immediately.
pub fn force_kill(state: &mut MatchState, target_side: PlayerId, slot: usize, depth: u32) {
    if let Some(unit) = state.side_mut(target_side).unit_mut(slot) {
        unit.current_hp = 0;
    }
    resolve_deaths(state, depth);
}

/// Sweep the board for entities at 0 hp and process each death fully:
/// capture keywords, clear the slot, move to graveyard, then resolve the
/// captured Deathrattle (which may cascade into further deaths).
///
/// Scan order is seats 0-1, slots low to high; the sweep restarts after
/// every processed death so cascades never observe a dead entity in a
/// slot. Termination: each death empties exactly one slot and nothing in
/// a cascade can refill it with the same entity.
pub fn resolve_deaths(state: &mut MatchState, depth: u32) {
    loop {
        let mut dying: Option<(PlayerId, usize)> = None;
        'scan: for side in PlayerId::both() {
            for (slot, unit) in state.side(side).occupied_slots() {
                if !unit.is_alive() {
                    dying = Some((side, slot));
                    break 'scan;
                }
            }
        }
        let Some((side, slot)) = dying else {
            return;
        };

        let card = state
            .side_mut(side)
            .take_unit(slot)
            .expect("sweep found an occupant");
        let dead_id = card.id;
        let keywords = card.keywords.clone();

        state.log_event(LogEntry::Destroyed {
            side,
            entity: dead_id,
        });
        state.side_mut(side).graveyard.push(card);

        scheduler::fire_deathrattle(state, side, dead_id, &keywords, depth + 1);
    }
}

/// Apply the same damage to a snapshot of entities, one full pipeline pass
/// each (death checks included). Entities removed by an earlier death in
/// the same sweep are skipped - their slot lookup simply misses.
pub fn damage_each(
    state: &mut MatchState,
    victims: &[EntityId],
    source: Option<EntityId>,
    amount: i32,
    depth: u32,
) -> i32 {
    let mut total = 0;
    for &victim in victims {
        if let Some((side, slot)) = state.find_unit(victim) {
            total += damage_unit(state, side, slot, source, amount, depth);
        }
    }
    total
}
