//! Healing.
//!
//! Heals clamp at max hp and never resurrect: a slot at 0 hp is already
//! empty by the time any heal could see it. Each healing *operation* is
//! one heal event - an AoE heal fires the reactive passives once, with
//! the summed amount, after all of its applications land.

use crate::core::PlayerId;
use crate::state::{LogEntry, LogTarget, MatchState};
use crate::triggers::scheduler;

/// Heal one battlefield entity without firing reactive passives.
/// Returns the amount actually restored.
pub fn heal_unit_raw(state: &mut MatchState, side: PlayerId, slot: usize, amount: i32) -> i32 {
    if amount <= 0 {
        return 0;
    }
    let Some(unit) = state.side_mut(side).unit_mut(slot) else {
        return 0;
    };
    let healed = amount.min(unit.max_hp - unit.current_hp).max(0);
    if healed == 0 {
        return 0;
    }
    unit.current_hp += healed;
    let target = unit.id;
    state.log_event(LogEntry::Heal {
        target: LogTarget::Unit(target),
        amount: healed,
    });
    healed
}

/// Heal a hero without firing reactive passives. Returns the amount
/// actually restored.
pub fn heal_hero_raw(state: &mut MatchState, side: PlayerId, amount: i32) -> i32 {
    let healed = state.side_mut(side).hero.heal(amount);
    if healed > 0 {
        state.log_event(LogEntry::Heal {
            target: LogTarget::Hero(side),
            amount: healed,
        });
    }
    healed
}

/// Close a healing operation: if anything was restored, the healed side's
/// heal-reactive passives fire once.
pub fn finish_heal_event(state: &mut MatchState, side: PlayerId, healed: i32, depth: u32) {
    if healed > 0 {
        scheduler::fire_on_heal(state, side, depth + 1);
    }
}

/// Heal a hero as one complete event (lifesteal, turn auras).
pub fn heal_hero_event(state: &mut MatchState, side: PlayerId, amount: i32, depth: u32) -> i32 {
    let healed = heal_hero_raw(state, side, amount);
    finish_heal_event(state, side, healed, depth);
    healed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardDefinition, CardId};
    use crate::core::{EntityId, PerPlayer};
    use crate::state::{CardType, Hero, PlayerSide};

    fn fresh() -> MatchState {
        MatchState::new(PerPlayer::new(|_| PlayerSide::new(Hero::new(30))), 42)
    }

    #[test]
    fn test_unit_heal_clamps() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let unit = CardDefinition::new(CardId::new(1), "U", CardType::Unit)
            .with_stats(1, 5)
            .instantiate(EntityId::new(10), p0);
        state.side_mut(p0).place(0, unit);
        state.side_mut(p0).unit_mut(0).unwrap().current_hp = 2;

        assert_eq!(heal_unit_raw(&mut state, p0, 0, 2), 2);
        assert_eq!(heal_unit_raw(&mut state, p0, 0, 9), 1);
        assert_eq!(heal_unit_raw(&mut state, p0, 0, 1), 0);
        assert_eq!(state.side(p0).unit(0).unwrap().current_hp, 5);
    }

    #[test]
    fn test_hero_heal_event_triggers_passives() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        // Chaplain pings a random enemy whenever its side heals.
        let chaplain = CardDefinition::new(CardId::new(11), "Chaplain", CardType::Unit)
            .with_stats(2, 3)
            .with_keyword("Trigger:OnHealDamageRandomEnemy1")
            .instantiate(EntityId::new(10), p0);
        state.side_mut(p0).place(0, chaplain);

        let victim = CardDefinition::new(CardId::new(1), "V", CardType::Unit)
            .with_stats(1, 3)
            .instantiate(EntityId::new(20), p1);
        state.side_mut(p1).place(0, victim);

        state.side_mut(p0).hero.hp = 20;
        heal_hero_event(&mut state, p0, 3, 0);

        assert_eq!(state.side(p0).hero.hp, 23);
        assert_eq!(state.side(p1).unit(0).unwrap().current_hp, 2);
    }

    #[test]
    fn test_full_hp_heal_fires_nothing() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        let chaplain = CardDefinition::new(CardId::new(11), "Chaplain", CardType::Unit)
            .with_stats(2, 3)
            .with_keyword("Trigger:OnHealDamageRandomEnemy1")
            .instantiate(EntityId::new(10), p0);
        state.side_mut(p0).place(0, chaplain);

        let victim = CardDefinition::new(CardId::new(1), "V", CardType::Unit)
            .with_stats(1, 3)
            .instantiate(EntityId::new(20), p1);
        state.side_mut(p1).place(0, victim);

        // Hero already at max: no heal event, no ping.
        heal_hero_event(&mut state, p0, 5, 0);
        assert_eq!(state.side(p1).unit(0).unwrap().current_hp, 3);
    }
}
