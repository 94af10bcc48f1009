//! Match controller - one player action, end to end.
//!
//! [`apply_action`] is the engine's single entry point: validate the
//! action against the current phase and seat (rejecting before any
//! mutation), execute the appropriate hook sequence, let the combat and
//! trigger machinery cascade to quiescence, and leave the mutated
//! `MatchState` ready for whole-record persistence. The caller serializes
//! actions per match id; the engine itself holds no locks and suspends
//! nowhere.

use serde::{Deserialize, Serialize};

use crate::catalog::{CardCatalog, CardId};
use crate::combat::{self, AttackTarget};
use crate::core::{EntityId, PerPlayer, PlayerId};
use crate::effects::resource;
use crate::error::ActionError;
use crate::modifiers;
use crate::state::{
    CardType, Hero, LogEntry, MatchState, Phase, PlayerSide, BATTLEFIELD_SLOTS,
};
use crate::triggers::{auras, scheduler};

/// One player action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Play a unit, structure, or relic from hand.
    Deploy {
        hand_index: usize,
        /// Battlefield slot; `None` picks the lowest empty one. Ignored
        /// for relics.
        slot: Option<usize>,
        /// Explicit Battlecry target specifier.
        target: Option<u32>,
    },
    /// Cast a spell from hand.
    CastSpell {
        hand_index: usize,
        target: Option<u32>,
    },
    /// Order a battlefield unit to attack.
    Attack {
        attacker: EntityId,
        target: AttackTarget,
    },
    /// End the turn, handing over to the opponent.
    EndTurn,
}

/// A recorded action with metadata, appended to the match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    /// Turn number when the action was taken.
    pub turn: u32,
}

/// Apply one action for one player.
///
/// On `Err` the state is untouched - every validation runs before the
/// first mutation. On `Ok` the state has fully absorbed the action,
/// cascades included, and carries a new history record.
pub fn apply_action(
    state: &mut MatchState,
    player: PlayerId,
    action: Action,
) -> Result<(), ActionError> {
    if state.is_finished() {
        return Err(ActionError::MatchFinished);
    }
    if state.active_player != player {
        return Err(ActionError::NotActivePlayer(player));
    }

    let turn = state.turn_number;
    match &action {
        Action::Deploy {
            hand_index,
            slot,
            target,
        } => deploy(state, player, *hand_index, *slot, *target)?,
        Action::CastSpell { hand_index, target } => cast_spell(state, player, *hand_index, *target)?,
        Action::Attack { attacker, target } => attack(state, player, *attacker, *target)?,
        Action::EndTurn => end_turn(state, player),
    }

    state.history.push_back(ActionRecord {
        player,
        action,
        turn,
    });
    Ok(())
}

fn deploy(
    state: &mut MatchState,
    player: PlayerId,
    hand_index: usize,
    slot: Option<usize>,
    target: Option<u32>,
) -> Result<(), ActionError> {
    if !matches!(state.phase, Phase::Deploying | Phase::WaitingRedeploy) {
        return Err(ActionError::WrongPhase(state.phase));
    }

    let side = state.side(player);
    let card = side
        .hand
        .get(hand_index)
        .ok_or(ActionError::InvalidHandIndex(hand_index))?;
    if card.card_type == CardType::Spell {
        return Err(ActionError::WrongCardType);
    }
    if card.mana_cost > side.hero.mana {
        return Err(ActionError::InsufficientMana {
            required: card.mana_cost,
            available: side.hero.mana,
        });
    }

    // Resolve placement before touching anything.
    let placement = match card.card_type {
        CardType::Relic => None,
        _ => Some(match slot {
            Some(s) => {
                if s >= BATTLEFIELD_SLOTS {
                    return Err(ActionError::InvalidSlot(s));
                }
                if side.unit(s).is_some() {
                    return Err(ActionError::SlotOccupied(s));
                }
                s
            }
            None => side.first_empty_slot().ok_or(ActionError::BattlefieldFull)?,
        }),
    };

    // Validation done; mutate.
    let mut card = state.side_mut(player).hand.remove(hand_index);
    let cost = card.mana_cost;
    let entity = card.id;
    state.side_mut(player).hero.spend_mana(cost);

    card.deployed_turn = state.turn_number;
    card.summoning_sickness = true;
    card.has_attacked_this_turn = false;

    match placement {
        Some(slot) => {
            state.side_mut(player).place(slot, card);
            state.log_event(LogEntry::Deployed {
                side: player,
                entity,
                slot: Some(slot),
            });
        }
        None => {
            state.side_mut(player).relics.push(card);
            state.log_event(LogEntry::Deployed {
                side: player,
                entity,
                slot: None,
            });
        }
    }

    if state.phase == Phase::WaitingRedeploy {
        state.phase = Phase::Deploying;
    }

    // Battlecry fires exactly once, here, at deployment.
    scheduler::fire_battlecry(state, player, entity, target, 0);
    Ok(())
}

fn cast_spell(
    state: &mut MatchState,
    player: PlayerId,
    hand_index: usize,
    target: Option<u32>,
) -> Result<(), ActionError> {
    if state.phase == Phase::GameOver {
        return Err(ActionError::WrongPhase(state.phase));
    }

    let side = state.side(player);
    let card = side
        .hand
        .get(hand_index)
        .ok_or(ActionError::InvalidHandIndex(hand_index))?;
    if card.card_type != CardType::Spell {
        return Err(ActionError::WrongCardType);
    }
    if card.mana_cost > side.hero.mana {
        return Err(ActionError::InsufficientMana {
            required: card.mana_cost,
            available: side.hero.mana,
        });
    }

    let card = state.side_mut(player).hand.remove(hand_index);
    let entity = card.id;
    let keywords = card.keywords.clone();
    state.side_mut(player).hero.spend_mana(card.mana_cost);
    state.log_event(LogEntry::SpellCast {
        side: player,
        entity,
    });
    state.side_mut(player).graveyard.push(card);

    let mut chain = false;
    for keyword in &keywords {
        if let crate::keywords::Keyword::Spell(op) = keyword {
            chain = crate::effects::run_op(state, player, entity, target, op, chain, 0);
        }
    }

    // Spell-cast-reactive passives fire after the spell fully resolves.
    if !state.is_finished() {
        scheduler::fire_on_spell_cast(state, player, 0);
    }
    Ok(())
}

fn attack(
    state: &mut MatchState,
    player: PlayerId,
    attacker: EntityId,
    target: AttackTarget,
) -> Result<(), ActionError> {
    if !matches!(state.phase, Phase::Deploying | Phase::Combat) {
        return Err(ActionError::WrongPhase(state.phase));
    }

    let slot = state
        .side(player)
        .find_unit(attacker)
        .ok_or(ActionError::UnknownAttacker)?;
    let unit = state.side(player).unit(slot).expect("found above");

    if unit.card_type != CardType::Unit {
        return Err(ActionError::WrongCardType);
    }
    if unit.frozen {
        return Err(ActionError::UnitFrozen);
    }
    if unit.has_attacked_this_turn {
        return Err(ActionError::UnitExhausted);
    }
    if unit.summoning_sickness && !unit.has_charge() {
        return Err(ActionError::SummoningSickness);
    }
    if modifiers::effective_attack(state, player, slot) <= 0 {
        return Err(ActionError::ZeroAttack);
    }

    let enemy = player.opponent();
    match target {
        AttackTarget::Unit(id) => {
            let def_slot = state
                .side(enemy)
                .find_unit(id)
                .ok_or(ActionError::InvalidTarget)?;
            let defender = state.side(enemy).unit(def_slot).expect("found above");
            if state.side(enemy).has_taunt_unit() && !defender.has_taunt() {
                return Err(ActionError::TauntInTheWay);
            }
        }
        AttackTarget::Hero => {
            if state.side(enemy).has_taunt_unit() {
                return Err(ActionError::TauntInTheWay);
            }
        }
    }

    // The first attack of the turn closes the deployment window.
    state.phase = Phase::Combat;
    combat::resolve_attack(state, player, attacker, target);
    Ok(())
}

fn end_turn(state: &mut MatchState, player: PlayerId) {
    scheduler::fire_end_of_turn(state, player, 0);
    if state.is_finished() {
        return;
    }

    let next = player.opponent();
    state.active_player = next;
    state.turn_number += 1;
    start_turn(state, next);
}

/// The new active side's turn start: mana ramp, readiness reset, freeze
/// countdown, draw, TurnStart triggers, turn auras, phase selection.
fn start_turn(state: &mut MatchState, player: PlayerId) {
    state.log_event(LogEntry::TurnStarted {
        side: player,
        turn: state.turn_number,
    });

    state.side_mut(player).hero.ramp_and_refill();

    for slot in 0..BATTLEFIELD_SLOTS {
        if let Some(unit) = state.side_mut(player).unit_mut(slot) {
            unit.summoning_sickness = false;
            unit.has_attacked_this_turn = false;
            unit.tick_freeze();
        }
    }

    resource::draw_cards(state, player, 1);
    if state.is_finished() {
        return;
    }

    scheduler::fire_turn_start(state, player, 0);
    if state.is_finished() {
        return;
    }

    auras::run_turn_auras(state, player, 0);
    if state.is_finished() {
        return;
    }

    state.phase = next_phase_for(state, player);
}

/// A side that lost its whole board (graveyard proves it had one) and
/// still holds a deployable unit starts its turn in the redeploy window.
fn next_phase_for(state: &MatchState, player: PlayerId) -> Phase {
    let side = state.side(player);
    let board_empty = side.board_count() == 0;
    let has_lost_units = side
        .graveyard
        .iter()
        .any(|c| matches!(c.card_type, CardType::Unit | CardType::Structure));
    let deployable_in_hand = side
        .hand
        .iter()
        .any(|c| matches!(c.card_type, CardType::Unit | CardType::Structure));

    if board_empty && has_lost_units && deployable_in_hand {
        Phase::WaitingRedeploy
    } else {
        Phase::Deploying
    }
}

/// Builder for a playable match (the engine-side collaborator of the
/// lobby service).
pub struct MatchBuilder<'a> {
    catalog: &'a CardCatalog,
    starting_hp: i32,
    starting_hand: usize,
    decks: PerPlayer<Vec<CardId>>,
    shuffle: bool,
}

impl<'a> MatchBuilder<'a> {
    /// Start a builder over a card catalog.
    #[must_use]
    pub fn new(catalog: &'a CardCatalog) -> Self {
        Self {
            catalog,
            starting_hp: 30,
            starting_hand: 3,
            decks: PerPlayer::with_default(),
            shuffle: true,
        }
    }

    /// Hero starting (and maximum) hp. Default 30.
    #[must_use]
    pub fn starting_hp(mut self, hp: i32) -> Self {
        self.starting_hp = hp;
        self
    }

    /// Starting hand size for the first player; the second player draws
    /// one extra. Default 3.
    #[must_use]
    pub fn starting_hand(mut self, cards: usize) -> Self {
        self.starting_hand = cards;
        self
    }

    /// Set a player's deck list. Ids missing from the catalog are
    /// dropped silently.
    #[must_use]
    pub fn deck(mut self, player: PlayerId, cards: Vec<CardId>) -> Self {
        self.decks[player] = cards;
        self
    }

    /// Keep deck order as given (tests).
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Build the initial match state. The starting player begins on
    /// 1 mana with their hand drawn; no Battlecry or trigger fires during
    /// setup.
    #[must_use]
    pub fn build(self, seed: u64) -> MatchState {
        let starting_hp = self.starting_hp;
        let mut state = MatchState::new(
            PerPlayer::new(|_| PlayerSide::new(Hero::new(starting_hp))),
            seed,
        );

        for player in PlayerId::both() {
            let mut deck = Vec::new();
            for card_id in &self.decks[player] {
                if let Some(definition) = self.catalog.get(*card_id) {
                    let entity = state.alloc_entity();
                    deck.push(definition.instantiate(entity, player));
                }
            }
            if self.shuffle {
                state.rng.shuffle(&mut deck);
            }
            state.side_mut(player).deck = deck;

            let hand_size = self.starting_hand + player.index();
            for _ in 0..hand_size {
                state.side_mut(player).draw();
            }
        }

        state.side_mut(PlayerId::new(0)).hero.ramp_and_refill();
        state
    }
}
