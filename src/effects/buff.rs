//! Permanent stat buffs.
//!
//! These mutate the stored `attack`/`max_hp`/`current_hp` in place, in
//! contrast with auras, which the modifier calculator recomputes at read
//! time. A negative health buff can drop a unit to its floor but the
//! floor is 1 - explicit buffs never kill; only damage and destroy
//! effects empty slots.

use crate::core::PlayerId;
use crate::state::{LogEntry, MatchState};

/// Buff the entity in a slot. Returns true if a live entity was there.
pub fn buff_unit(
    state: &mut MatchState,
    side: PlayerId,
    slot: usize,
    attack: i32,
    health: i32,
) -> bool {
    let Some(unit) = state.side_mut(side).unit_mut(slot) else {
        return false;
    };
    unit.apply_buff(attack, health);
    let target = unit.id;
    state.log_event(LogEntry::Buffed {
        target,
        attack,
        health,
    });
    true
}

/// Buff every battlefield entity on a side. Returns how many were hit.
pub fn buff_all(state: &mut MatchState, side: PlayerId, attack: i32, health: i32) -> u32 {
    let slots: Vec<usize> = state.side(side).occupied_slots().map(|(i, _)| i).collect();
    let mut buffed = 0;
    for slot in slots {
        if buff_unit(state, side, slot, attack, health) {
            buffed += 1;
        }
    }
    buffed
}

/// Grant the divine-shield flag to the entity in a slot.
pub fn give_divine_shield(state: &mut MatchState, side: PlayerId, slot: usize) -> bool {
    let Some(unit) = state.side_mut(side).unit_mut(slot) else {
        return false;
    };
    unit.has_divine_shield = true;
    true
}
