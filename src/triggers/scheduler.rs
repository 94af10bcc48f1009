//! Trigger scheduler - firing keyword effects at lifecycle points.
//!
//! Each hook scans the relevant keyword lists and runs the matching
//! category's ops through the dispatcher, threading the chain boolean in
//! list order. Board scans go battlefield slot order, low to high; the
//! occupant set is snapshotted first so a trigger that kills or summons
//! mid-scan never corrupts the walk, and every entity is re-checked
//! against the board before its own ops run.
//!
//! Re-entrancy is direct recursion: a Deathrattle that deals damage calls
//! back into the damage pipeline, which may call back in here. The depth
//! argument rides along and the dispatcher stops cascades at its cap.

use crate::core::{EntityId, PlayerId};
use crate::effects::run_op;
use crate::keywords::{EffectOp, Keyword, KeywordList};
use crate::state::MatchState;

/// Which board-wide hook is being fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BoardHook {
    TurnStart,
    EndOfTurn,
    OnHeal,
    OnSpellCast,
}

fn hook_op(keyword: &Keyword, hook: BoardHook) -> Option<EffectOp> {
    match (hook, keyword) {
        (BoardHook::TurnStart, Keyword::TurnStart(op)) => Some(op.clone()),
        (BoardHook::EndOfTurn, Keyword::EndOfTurn(op)) => Some(op.clone()),
        (BoardHook::OnHeal, Keyword::OnHeal(op)) => Some(op.clone()),
        (BoardHook::OnSpellCast, Keyword::OnSpellCast(op)) => Some(op.clone()),
        _ => None,
    }
}

/// Keyword list of an entity wherever it currently stands (battlefield or
/// relic row); empty if it is gone.
fn keywords_of(state: &MatchState, side: PlayerId, entity: EntityId) -> KeywordList {
    if let Some((owner, slot)) = state.find_unit(entity) {
        if let Some(unit) = state.side(owner).unit(slot) {
            return unit.keywords.clone();
        }
    }
    if let Some(index) = state.side(side).find_relic(entity) {
        return state.side(side).relics[index].keywords.clone();
    }
    KeywordList::new()
}

/// Fire a card's Battlecry ops. Called exactly once per deployment, by
/// the controller; the keyword list itself carries no already-fired flag.
pub fn fire_battlecry(
    state: &mut MatchState,
    side: PlayerId,
    source: EntityId,
    target: Option<u32>,
    depth: u32,
) {
    let keywords = keywords_of(state, side, source);
    let mut chain = false;
    for keyword in &keywords {
        if let Keyword::Battlecry(op) = keyword {
            chain = run_op(state, side, source, target, op, chain, depth);
        }
    }
}

/// Fire a destroyed entity's Deathrattle ops from the keyword list
/// captured before removal. The slot is already empty and the card in
/// the graveyard; a silence applied in time suppressed this by emptying
/// the list.
pub fn fire_deathrattle(
    state: &mut MatchState,
    side: PlayerId,
    dead: EntityId,
    keywords: &KeywordList,
    depth: u32,
) {
    let mut chain = false;
    for keyword in keywords {
        if let Keyword::Deathrattle(op) = keyword {
            chain = run_op(state, side, dead, None, op, chain, depth);
        }
    }
}

/// Fire the attacker's OnAttack ops, before any damage is computed.
/// `target` is the declared attack target (None for the enemy hero).
pub fn fire_on_attack(
    state: &mut MatchState,
    side: PlayerId,
    attacker: EntityId,
    target: Option<u32>,
    depth: u32,
) {
    let keywords = keywords_of(state, side, attacker);
    let mut chain = false;
    for keyword in &keywords {
        if let Keyword::OnAttack(op) = keyword {
            chain = run_op(state, side, attacker, target, op, chain, depth);
        }
    }
}

/// Fire the attacker's AfterAttack ops, once the whole exchange (both
/// Double Strike hits included) has settled.
pub fn fire_after_attack(
    state: &mut MatchState,
    side: PlayerId,
    attacker: EntityId,
    target: Option<u32>,
    depth: u32,
) {
    let keywords = keywords_of(state, side, attacker);
    let mut chain = false;
    for keyword in &keywords {
        if let Keyword::AfterAttack(op) = keyword {
            chain = run_op(state, side, attacker, target, op, chain, depth);
        }
    }
}

/// Fire a damaged entity's OnDamageTaken ops. Runs once per damage event
/// that actually landed, with the damage source as context - that is what
/// retaliation ops like `FreezeAttacker` resolve against.
pub fn fire_on_damage_taken(
    state: &mut MatchState,
    side: PlayerId,
    slot: usize,
    source: Option<EntityId>,
    depth: u32,
) {
    let Some(unit) = state.side(side).unit(slot) else {
        return;
    };
    let entity = unit.id;
    let keywords = unit.keywords.clone();
    let spec = source.map(EntityId::raw);

    let mut chain = false;
    for keyword in &keywords {
        if let Keyword::OnDamageTaken(op) = keyword {
            chain = run_op(state, side, entity, spec, op, chain, depth);
        }
    }
}

fn fire_board_hook(state: &mut MatchState, side: PlayerId, hook: BoardHook, depth: u32) {
    let entities: Vec<EntityId> = state
        .side(side)
        .occupied_slots()
        .filter(|(_, c)| !c.keywords.is_empty())
        .map(|(_, c)| c.id)
        .collect();

    for entity in entities {
        // The entity may have been removed by an earlier trigger in the
        // same sweep; its ops are read fresh from wherever it stands now.
        let Some((owner, slot)) = state.find_unit(entity) else {
            continue;
        };
        if owner != side {
            continue;
        }
        let keywords = state.side(owner).unit(slot).map(|u| u.keywords.clone());
        let Some(keywords) = keywords else { continue };

        let mut chain = false;
        for keyword in &keywords {
            if let Some(op) = hook_op(keyword, hook) {
                chain = run_op(state, side, entity, None, &op, chain, depth);
            }
        }
        if state.is_finished() {
            return;
        }
    }
}

/// Fire TurnStart ops for every keyword-bearing entity on a side.
pub fn fire_turn_start(state: &mut MatchState, side: PlayerId, depth: u32) {
    fire_board_hook(state, side, BoardHook::TurnStart, depth);
}

/// Fire EndOfTurn ops for every keyword-bearing entity on a side.
pub fn fire_end_of_turn(state: &mut MatchState, side: PlayerId, depth: u32) {
    fire_board_hook(state, side, BoardHook::EndOfTurn, depth);
}

/// Fire heal-reactive passives on the side that just healed.
pub fn fire_on_heal(state: &mut MatchState, side: PlayerId, depth: u32) {
    fire_board_hook(state, side, BoardHook::OnHeal, depth);
}

/// Fire spell-cast-reactive passives on the casting side.
pub fn fire_on_spell_cast(state: &mut MatchState, side: PlayerId, depth: u32) {
    fire_board_hook(state, side, BoardHook::OnSpellCast, depth);
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

    fn place(state: &mut MatchState, side: PlayerId, slot: usize, id: u32, keywords: &[&str]) {
        let mut def = CardDefinition::new(CardId::new(1), "U", CardType::Unit).with_stats(2, 4);
        for kw in keywords {
            def = def.with_keyword(kw);
        }
        state
            .side_mut(side)
            .place(slot, def.instantiate(EntityId::new(id), side));
    }

    #[test]
    fn test_battlecry_chain_in_list_order() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        place(
            &mut state,
            p0,
            0,
            10,
            &[
                "Battlecry:ConditionalRelicDestroy",
                "Battlecry:ConditionalBuff+2+2",
            ],
        );
        let relic = CardDefinition::new(CardId::new(30), "R", CardType::Relic)
            .instantiate(EntityId::new(50), p1);
        state.side_mut(p1).relics.push(relic);

        fire_battlecry(&mut state, p0, EntityId::new(10), None, 0);

        assert!(state.side(p1).relics.is_empty());
        assert_eq!(state.side(p0).unit(0).unwrap().attack, 4);
    }

    #[test]
    fn test_on_damage_freeze_attacker() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        place(&mut state, p0, 0, 10, &[]);
        place(&mut state, p1, 0, 20, &["OnDamage:FreezeAttacker"]);

        // Simulate the revenant taking a hit from entity 10.
        crate::effects::damage::damage_unit(
            &mut state,
            p1,
            0,
            Some(EntityId::new(10)),
            2,
            0,
        );

        assert!(state.side(p0).unit(0).unwrap().frozen);
    }

    #[test]
    fn test_turn_start_hook_runs_slot_order() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        place(&mut state, p0, 2, 10, &["TurnStart:BuffSelf+1+0"]);
        place(&mut state, p0, 4, 11, &["TurnStart:BuffSelf+2+0"]);

        fire_turn_start(&mut state, p0, 0);

        assert_eq!(state.side(p0).unit(2).unwrap().attack, 3);
        assert_eq!(state.side(p0).unit(4).unwrap().attack, 4);
    }

    #[test]
    fn test_end_of_turn_hook() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        place(&mut state, p0, 0, 10, &["EndOfTurn:DamageRandomEnemy1"]);

        fire_end_of_turn(&mut state, p0, 0);

        // Empty enemy board: ping redirected to the enemy hero.
        assert_eq!(state.side(PlayerId::new(1)).hero.hp, 29);
    }

    #[test]
    fn test_spell_cast_hook_draws() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        place(&mut state, p0, 0, 10, &["Passive:OnSpellCastDraw1"]);
        let card = CardDefinition::new(CardId::new(2), "C", CardType::Unit)
            .with_stats(1, 1)
            .instantiate(EntityId::new(30), p0);
        state.side_mut(p0).deck.push(card);

        fire_on_spell_cast(&mut state, p0, 0);

        assert_eq!(state.side(p0).hand.len(), 1);
    }

    #[test]
    fn test_deathrattle_cascade_terminates() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        // Two rattlers at 1 hp each; killing the first sprays damage that
        // kills the second, whose own rattle fires into an empty board.
        place(
            &mut state,
            p1,
            0,
            20,
            &["Deathrattle:DamageAllEnemies2", "Deathrattle:SummonHusk1_1"],
        );
        place(&mut state, p0, 0, 10, &["Deathrattle:DamageAllEnemies2"]);
        state.side_mut(p1).unit_mut(0).unwrap().current_hp = 1;
        state.side_mut(p0).unit_mut(0).unwrap().current_hp = 1;

        crate::effects::damage::damage_unit(&mut state, p1, 0, None, 1, 0);

        // First rattler died, its AoE killed the second, the husk token
        // still landed for the first side.
        assert!(state.side(p0).unit(0).is_none());
        assert_eq!(state.side(p1).graveyard.len(), 1);
        assert_eq!(state.side(p0).graveyard.len(), 1);
        let husk = state.side(p1).unit(0).expect("husk summoned");
        assert!(husk.is_token);
    }
}
