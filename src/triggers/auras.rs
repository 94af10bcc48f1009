//! Turn-based auras: always-on per-turn effects from structures and
//! relics, run at their owner's turn start.
//!
//! Scan order is battlefield slot order, then the relic row. Pings and
//! random buffs reuse the regular op dispatcher so targeting and logging
//! stay uniform with every other effect.

use crate::core::{EntityId, PlayerId};
use crate::effects::run_op;
use crate::keywords::{EffectOp, Keyword, TurnAura};
use crate::state::{LogEntry, MatchState};

/// Run every turn-based aura on a side.
pub fn run_turn_auras(state: &mut MatchState, side: PlayerId, depth: u32) {
    let carriers: Vec<EntityId> = {
        let half = state.side(side);
        half.occupied_slots()
            .map(|(_, c)| c.id)
            .chain(half.relics.iter().map(|c| c.id))
            .collect()
    };

    for carrier in carriers {
        let auras = turn_auras_of(state, side, carrier);
        for aura in auras {
            apply_turn_aura(state, side, carrier, aura, depth);
            if state.is_finished() {
                return;
            }
        }
    }
}

fn turn_auras_of(state: &MatchState, side: PlayerId, carrier: EntityId) -> Vec<TurnAura> {
    let keywords = if let Some((owner, slot)) = state.find_unit(carrier) {
        state
            .side(owner)
            .unit(slot)
            .map(|c| c.keywords.clone())
            .unwrap_or_default()
    } else if let Some(index) = state.side(side).find_relic(carrier) {
        state.side(side).relics[index].keywords.clone()
    } else {
        return Vec::new();
    };

    keywords
        .iter()
        .filter_map(|k| match k {
            Keyword::TurnAura(aura) => Some(*aura),
            _ => None,
        })
        .collect()
}

fn apply_turn_aura(
    state: &mut MatchState,
    side: PlayerId,
    carrier: EntityId,
    aura: TurnAura,
    depth: u32,
) {
    match aura {
        TurnAura::HealHero(amount) => {
            crate::effects::heal::heal_hero_event(state, side, amount, depth);
        }
        TurnAura::PingRandomEnemy(amount) => {
            run_op(
                state,
                side,
                carrier,
                None,
                &EffectOp::DamageRandomEnemy(amount),
                false,
                depth,
            );
        }
        TurnAura::ManaRampCycle { period } => {
            if state.turn_number % period == 0 {
                let hero = &mut state.side_mut(side).hero;
                hero.grow_max_mana(1);
                hero.gain_mana(1);
                state.log_event(LogEntry::ManaGained { side, amount: 1 });
            }
        }
        TurnAura::RandomAllyBuff { attack, health } => {
            run_op(
                state,
                side,
                carrier,
                None,
                &EffectOp::BuffRandomAlly { attack, health },
                false,
                depth,
            );
        }
    }
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

    #[test]
    fn test_fountain_heals_each_turn() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let fountain = CardDefinition::new(CardId::new(22), "Fountain", CardType::Structure)
            .with_stats(0, 3)
            .with_keyword("Structure:TurnHealHero2")
            .instantiate(EntityId::new(10), p0);
        state.side_mut(p0).place(0, fountain);
        state.side_mut(p0).hero.hp = 20;

        run_turn_auras(&mut state, p0, 0);
        assert_eq!(state.side(p0).hero.hp, 22);
    }

    #[test]
    fn test_beacon_pings_enemy_hero_on_empty_board() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let beacon = CardDefinition::new(CardId::new(23), "Beacon", CardType::Structure)
            .with_stats(0, 3)
            .with_keyword("Structure:TurnPing1")
            .instantiate(EntityId::new(10), p0);
        state.side_mut(p0).place(0, beacon);

        run_turn_auras(&mut state, p0, 0);
        assert_eq!(state.side(PlayerId::new(1)).hero.hp, 29);
    }

    #[test]
    fn test_mana_ramp_fires_on_cycle_only() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let prism = CardDefinition::new(CardId::new(30), "Prism", CardType::Relic)
            .with_keyword("Relic:TurnManaRamp3")
            .instantiate(EntityId::new(10), p0);
        state.side_mut(p0).relics.push(prism);
        state.side_mut(p0).hero.max_mana = 2;

        state.turn_number = 2;
        run_turn_auras(&mut state, p0, 0);
        assert_eq!(state.side(p0).hero.max_mana, 2);

        state.turn_number = 3;
        run_turn_auras(&mut state, p0, 0);
        assert_eq!(state.side(p0).hero.max_mana, 3);
    }

    #[test]
    fn test_totem_buffs_some_ally() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let totem = CardDefinition::new(CardId::new(32), "Totem", CardType::Relic)
            .with_keyword("Relic:TurnBuffRandom+1+1")
            .instantiate(EntityId::new(10), p0);
        state.side_mut(p0).relics.push(totem);
        let unit = CardDefinition::new(CardId::new(1), "U", CardType::Unit)
            .with_stats(2, 2)
            .instantiate(EntityId::new(11), p0);
        state.side_mut(p0).place(0, unit);

        run_turn_auras(&mut state, p0, 0);

        let unit = state.side(p0).unit(0).unwrap();
        assert_eq!(unit.attack, 3);
        assert_eq!(unit.max_hp, 3);
    }
}
