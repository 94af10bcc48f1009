//! One player's half of the match: hero, hand, deck, graveyard,
//! battlefield slots, and relic row.
//!
//! ## Zones
//!
//! - `hand`: ordered, capped at [`HAND_LIMIT`]; overdraws burn the card.
//! - `deck`: ordered, drawn from the front; empty-deck draws convert to
//!   escalating fatigue damage.
//! - `graveyard`: ordered, most-recent-last.
//! - `battlefield`: fixed array of optional slots; one entity per slot.
//! - `relics`: small ordered list, unbounded.

use serde::{Deserialize, Serialize};

use super::card::{CardInstance, CardType};
use super::hero::Hero;
use crate::core::EntityId;

/// Number of battlefield slots per side.
pub const BATTLEFIELD_SLOTS: usize = 7;

/// Maximum hand size; draws past it are burned, not queued.
pub const HAND_LIMIT: usize = 10;

/// Result of one draw attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The card reached the hand.
    Drawn(EntityId),
    /// Hand was full; the card left the match entirely.
    Burned(EntityId),
    /// Deck was empty; the hero took the new fatigue counter in damage.
    Fatigue(u32),
}

/// One side of the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSide {
    pub hero: Hero,
    pub hand: Vec<CardInstance>,
    pub deck: Vec<CardInstance>,
    pub graveyard: Vec<CardInstance>,
    pub battlefield: [Option<CardInstance>; BATTLEFIELD_SLOTS],
    pub relics: Vec<CardInstance>,
}

impl PlayerSide {
    /// Create an empty side behind the given hero.
    #[must_use]
    pub fn new(hero: Hero) -> Self {
        Self {
            hero,
            hand: Vec::new(),
            deck: Vec::new(),
            graveyard: Vec::new(),
            battlefield: Default::default(),
            relics: Vec::new(),
        }
    }

    // === Battlefield ===

    /// The entity in a slot, if any.
    #[must_use]
    pub fn unit(&self, slot: usize) -> Option<&CardInstance> {
        self.battlefield.get(slot).and_then(|s| s.as_ref())
    }

    /// Mutable access to the entity in a slot.
    pub fn unit_mut(&mut self, slot: usize) -> Option<&mut CardInstance> {
        self.battlefield.get_mut(slot).and_then(|s| s.as_mut())
    }

    /// Find the slot holding a given entity.
    #[must_use]
    pub fn find_unit(&self, id: EntityId) -> Option<usize> {
        self.battlefield
            .iter()
            .position(|s| s.as_ref().is_some_and(|c| c.id == id))
    }

    /// Lowest-index empty slot, if the battlefield has room.
    #[must_use]
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.battlefield.iter().position(|s| s.is_none())
    }

    /// Iterate populated slots, low index to high.
    pub fn occupied_slots(&self) -> impl Iterator<Item = (usize, &CardInstance)> {
        self.battlefield
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|c| (i, c)))
    }

    /// Slots holding units (not structures), low index to high.
    pub fn unit_slots(&self) -> impl Iterator<Item = (usize, &CardInstance)> {
        self.occupied_slots()
            .filter(|(_, c)| c.card_type == CardType::Unit)
    }

    /// Put a card into an empty slot. Panics if the slot is taken; the
    /// controller validates placement, and summons pick empty slots.
    pub fn place(&mut self, slot: usize, card: CardInstance) {
        debug_assert!(self.battlefield[slot].is_none(), "slot collision");
        self.battlefield[slot] = Some(card);
    }

    /// Empty a slot, returning whatever was in it. This is the only way
    /// an entity leaves the battlefield.
    pub fn take_unit(&mut self, slot: usize) -> Option<CardInstance> {
        self.battlefield.get_mut(slot).and_then(|s| s.take())
    }

    /// Whether any living Taunt unit is on this battlefield.
    #[must_use]
    pub fn has_taunt_unit(&self) -> bool {
        self.occupied_slots().any(|(_, c)| c.has_taunt())
    }

    /// Count of populated slots.
    #[must_use]
    pub fn board_count(&self) -> usize {
        self.occupied_slots().count()
    }

    // === Relics ===

    /// Find a relic's position by entity id.
    #[must_use]
    pub fn find_relic(&self, id: EntityId) -> Option<usize> {
        self.relics.iter().position(|c| c.id == id)
    }

    // === Hand and deck ===

    /// Draw one card from the front of the deck.
    ///
    /// Empty deck: the hero takes the escalating fatigue hit instead.
    /// Full hand: the card is burned - it ends up in no zone at all.
    pub fn draw(&mut self) -> DrawOutcome {
        if self.deck.is_empty() {
            return DrawOutcome::Fatigue(self.hero.take_fatigue());
        }
        let card = self.deck.remove(0);
        let id = card.id;
        if self.hand.len() >= HAND_LIMIT {
            return DrawOutcome::Burned(id);
        }
        self.hand.push(card);
        DrawOutcome::Drawn(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use smallvec::SmallVec;

    fn card(id: u32) -> CardInstance {
        CardInstance {
            id: EntityId::new(id),
            name: format!("Card {}", id),
            card_type: CardType::Unit,
            owner: PlayerId::new(0),
            mana_cost: 1,
            attack: 1,
            current_hp: 1,
            max_hp: 1,
            element: None,
            keywords: SmallVec::new(),
            frozen: false,
            frozen_turns_remaining: 0,
            silenced: false,
            has_divine_shield: false,
            summoning_sickness: false,
            has_attacked_this_turn: false,
            is_token: false,
            deployed_turn: 0,
        }
    }

    fn side() -> PlayerSide {
        PlayerSide::new(Hero::new(30))
    }

    #[test]
    fn test_draw_from_front() {
        let mut side = side();
        side.deck = vec![card(1), card(2), card(3)];

        assert_eq!(side.draw(), DrawOutcome::Drawn(EntityId::new(1)));
        assert_eq!(side.draw(), DrawOutcome::Drawn(EntityId::new(2)));
        assert_eq!(side.hand.len(), 2);
        assert_eq!(side.deck.len(), 1);
    }

    #[test]
    fn test_overdraw_burns() {
        let mut side = side();
        for i in 0..HAND_LIMIT {
            side.hand.push(card(i as u32));
        }
        side.deck = vec![card(100)];

        assert_eq!(side.draw(), DrawOutcome::Burned(EntityId::new(100)));
        assert_eq!(side.hand.len(), HAND_LIMIT);
        assert!(side.deck.is_empty());
        assert!(side.graveyard.is_empty());
    }

    #[test]
    fn test_empty_deck_fatigue_escalates() {
        let mut side = side();

        assert_eq!(side.draw(), DrawOutcome::Fatigue(1));
        assert_eq!(side.hero.hp, 29);
        assert_eq!(side.draw(), DrawOutcome::Fatigue(2));
        assert_eq!(side.hero.hp, 27);
        assert!(side.hand.is_empty());
    }

    #[test]
    fn test_slot_operations() {
        let mut side = side();
        assert_eq!(side.first_empty_slot(), Some(0));

        side.place(0, card(1));
        side.place(2, card(2));

        assert_eq!(side.first_empty_slot(), Some(1));
        assert_eq!(side.find_unit(EntityId::new(2)), Some(2));
        assert_eq!(side.find_unit(EntityId::new(99)), None);
        assert_eq!(side.board_count(), 2);

        let slots: Vec<usize> = side.occupied_slots().map(|(i, _)| i).collect();
        assert_eq!(slots, vec![0, 2]);

        let removed = side.take_unit(0).unwrap();
        assert_eq!(removed.id, EntityId::new(1));
        assert!(side.unit(0).is_none());
    }

    #[test]
    fn test_full_battlefield() {
        let mut side = side();
        for i in 0..BATTLEFIELD_SLOTS {
            side.place(i, card(i as u32));
        }
        assert_eq!(side.first_empty_slot(), None);
        assert_eq!(side.board_count(), BATTLEFIELD_SLOTS);
    }

    #[test]
    fn test_has_taunt_unit() {
        use crate::keywords::Keyword;

        let mut side = side();
        assert!(!side.has_taunt_unit());

        let mut taunt = card(5);
        taunt.keywords.push(Keyword::Taunt);
        side.place(3, taunt);

        assert!(side.has_taunt_unit());
    }

    #[test]
    fn test_unit_slots_skip_structures() {
        let mut side = side();
        let mut wall = card(7);
        wall.card_type = CardType::Structure;
        side.place(0, wall);
        side.place(1, card(8));

        let units: Vec<usize> = side.unit_slots().map(|(i, _)| i).collect();
        assert_eq!(units, vec![1]);
    }
}
