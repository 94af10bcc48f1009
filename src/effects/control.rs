//! Control effects: freeze, silence, destroy.

use crate::core::{EntityId, PlayerId};
use crate::state::{LogEntry, MatchState};

use super::damage;

/// Freeze the entity in a slot for `turns` turns.
pub fn freeze_unit(state: &mut MatchState, side: PlayerId, slot: usize, turns: u32) -> bool {
    let Some(unit) = state.side_mut(side).unit_mut(slot) else {
        return false;
    };
    unit.freeze(turns);
    let target = unit.id;
    let turns = unit.frozen_turns_remaining;
    state.log_event(LogEntry::Frozen { target, turns });
    true
}

/// Freeze whatever entity dealt the damage, wherever it stands now.
/// A hero source (fatigue, hero powers) or a source that already left the
/// board freezes nothing.
pub fn freeze_attacker(state: &mut MatchState, source: Option<EntityId>, turns: u32) -> bool {
    let Some(source) = source else {
        return false;
    };
    let Some((side, slot)) = state.find_unit(source) else {
        return false;
    };
    freeze_unit(state, side, slot, turns)
}

/// Strip the entity in a slot of keywords, shield, and freeze.
pub fn silence_unit(state: &mut MatchState, side: PlayerId, slot: usize) -> bool {
    let Some(unit) = state.side_mut(side).unit_mut(slot) else {
        return false;
    };
    unit.silence();
    let target = unit.id;
    state.log_event(LogEntry::Silenced { target });
    true
}

/// Destroy the entity in a slot outright. Goes through the regular death
/// path, so its Deathrattle (unless silenced first) still resolves.
pub fn destroy_unit(state: &mut MatchState, side: PlayerId, slot: usize, depth: u32) -> bool {
    if state.side(side).unit(slot).is_none() {
        return false;
    }
    damage::force_kill(state, side, slot, depth);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardDefinition, CardId};
    use crate::core::PerPlayer;
    use crate::state::{CardType, Hero, PlayerSide};

    fn fresh() -> MatchState {
        MatchState::new(PerPlayer::new(|_| PlayerSide::new(Hero::new(30))), 42)
    }

    fn place(state: &mut MatchState, side: PlayerId, slot: usize, id: u32, keyword: Option<&str>) {
        let mut def = CardDefinition::new(CardId::new(1), "U", CardType::Unit).with_stats(2, 3);
        if let Some(kw) = keyword {
            def = def.with_keyword(kw);
        }
        state
            .side_mut(side)
            .place(slot, def.instantiate(EntityId::new(id), side));
    }

    #[test]
    fn test_freeze_unit() {
        let mut state = fresh();
        let p1 = PlayerId::new(1);
        place(&mut state, p1, 0, 10, None);

        assert!(freeze_unit(&mut state, p1, 0, 2));

        let unit = state.side(p1).unit(0).unwrap();
        assert!(unit.frozen);
        assert_eq!(unit.frozen_turns_remaining, 2);
    }

    #[test]
    fn test_freeze_attacker_resolves_source() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        place(&mut state, p0, 3, 10, None);

        assert!(freeze_attacker(&mut state, Some(EntityId::new(10)), 1));
        assert!(state.side(p0).unit(3).unwrap().frozen);

        // A source that is no longer anywhere freezes nothing.
        assert!(!freeze_attacker(&mut state, Some(EntityId::new(99)), 1));
        assert!(!freeze_attacker(&mut state, None, 1));
    }

    #[test]
    fn test_silence() {
        let mut state = fresh();
        let p1 = PlayerId::new(1);
        place(&mut state, p1, 0, 10, Some("Taunt"));

        assert!(silence_unit(&mut state, p1, 0));

        let unit = state.side(p1).unit(0).unwrap();
        assert!(unit.silenced);
        assert!(unit.keywords.is_empty());
    }

    #[test]
    fn test_destroy_runs_deathrattle() {
        let mut state = fresh();
        let p1 = PlayerId::new(1);
        place(&mut state, p1, 0, 10, Some("Deathrattle:SummonHusk1_1"));

        assert!(destroy_unit(&mut state, p1, 0, 0));

        let token = state.side(p1).unit(0).expect("husk from deathrattle");
        assert!(token.is_token);
    }

    #[test]
    fn test_destroy_empty_slot() {
        let mut state = fresh();
        assert!(!destroy_unit(&mut state, PlayerId::new(1), 5, 0));
    }
}
