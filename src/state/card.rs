//! Card instances - runtime card state.
//!
//! `CardInstance` is a specific card in a specific match: a unit or
//! structure on the battlefield, a relic in the relic row, or a card
//! (including a spell) waiting in hand or deck. Static per-card data
//! lives in [`crate::catalog::CardDefinition`]; the instance carries
//! everything that mutates during play.
//!
//! A unit's identity persists across mutation — attack and hp change in
//! place under the same `EntityId`. Destruction is the only removal path:
//! the slot is emptied and the card moves to the graveyard.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId};
use crate::keywords::Keyword;

/// What a card is, which decides where it can go and what it can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Battlefield entity that can attack and be attacked.
    Unit,
    /// Battlefield entity that cannot attack; usually carries auras.
    Structure,
    /// Side-row entity; not attackable, destroyed only by effects.
    Relic,
    /// One-shot effect card; resolves from hand to graveyard.
    Spell,
}

/// Element tag used by tribe-keyed auras.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Wind,
    Light,
    Dark,
}

impl Element {
    /// Parse an element name as it appears inside keyword identifiers.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Fire" => Some(Self::Fire),
            "Water" => Some(Self::Water),
            "Earth" => Some(Self::Earth),
            "Wind" => Some(Self::Wind),
            "Light" => Some(Self::Light),
            "Dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// A card instance in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id, assigned at creation and stable for the card's lifetime.
    pub id: EntityId,

    /// Display name (from the definition, or the token name).
    pub name: String,

    /// What kind of card this is.
    pub card_type: CardType,

    /// The seat that owns this card.
    pub owner: PlayerId,

    /// Mana cost to play from hand. Tokens are never in hand; theirs is 0.
    pub mana_cost: i32,

    /// Current attack. Base value from the definition, mutated in place by
    /// permanent buffs. Aura bonuses are NOT stored here - see
    /// [`crate::modifiers::effective_attack`].
    pub attack: i32,

    /// Current hp. Live entities always have `current_hp > 0`; a card at
    /// 0 or below is removed in the same resolution step.
    pub current_hp: i32,

    /// Maximum hp. Permanent +hp buffs raise both.
    pub max_hp: i32,

    /// Element tag for tribe-keyed auras.
    pub element: Option<Element>,

    /// Parsed keyword list. Execution order within one entity is list
    /// order. Empty after a silence.
    pub keywords: SmallVec<[Keyword; 4]>,

    // === Status flags ===
    /// Frozen units skip attacking until the counter runs out.
    pub frozen: bool,

    /// Turns of freeze left; 0 implies `frozen == false`.
    pub frozen_turns_remaining: u32,

    /// Set once a silence lands; the keyword list is cleared with it.
    pub silenced: bool,

    /// Absorbs the next instance of damage, then clears.
    pub has_divine_shield: bool,

    /// Deployed or summoned this turn; cannot attack without Charge.
    pub summoning_sickness: bool,

    /// Spent its attack for this turn.
    pub has_attacked_this_turn: bool,

    /// Token summoned by an effect rather than played from hand.
    pub is_token: bool,

    /// Turn number the card hit the battlefield (or relic row).
    pub deployed_turn: u32,
}

impl CardInstance {
    /// Check whether the card counts as alive on the battlefield.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Check for a flat status keyword.
    #[must_use]
    pub fn has_keyword(&self, keyword: &Keyword) -> bool {
        self.keywords.contains(keyword)
    }

    #[must_use]
    pub fn has_taunt(&self) -> bool {
        self.has_keyword(&Keyword::Taunt)
    }

    #[must_use]
    pub fn has_lifesteal(&self) -> bool {
        self.has_keyword(&Keyword::Lifesteal)
    }

    /// Poison and Poison-Touch share the forced-lethal semantic.
    #[must_use]
    pub fn has_poison(&self) -> bool {
        self.has_keyword(&Keyword::Poison) || self.has_keyword(&Keyword::PoisonTouch)
    }

    #[must_use]
    pub fn has_double_strike(&self) -> bool {
        self.has_keyword(&Keyword::DoubleStrike)
    }

    #[must_use]
    pub fn has_charge(&self) -> bool {
        self.has_keyword(&Keyword::Charge)
    }

    /// Whether this card can be ordered to attack right now.
    ///
    /// Only checks the unit's own state; Taunt legality depends on the
    /// enemy board and is enforced by the controller.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.card_type == CardType::Unit
            && !self.frozen
            && !self.has_attacked_this_turn
            && (!self.summoning_sickness || self.has_charge())
    }

    /// Apply a permanent stat buff. Health buffs raise current and max hp
    /// together; negative health deltas lower max hp but never below 1 and
    /// never lift current hp.
    pub fn apply_buff(&mut self, attack: i32, health: i32) {
        self.attack = (self.attack + attack).max(0);
        if health >= 0 {
            self.max_hp += health;
            self.current_hp += health;
        } else {
            self.max_hp = (self.max_hp + health).max(1);
            self.current_hp = self.current_hp.min(self.max_hp);
        }
    }

    /// Freeze for `turns` turns (at least 1).
    pub fn freeze(&mut self, turns: u32) {
        let turns = turns.max(1);
        self.frozen = true;
        self.frozen_turns_remaining = self.frozen_turns_remaining.max(turns);
    }

    /// Tick the freeze counter at the owner's turn start.
    pub fn tick_freeze(&mut self) {
        if self.frozen_turns_remaining > 0 {
            self.frozen_turns_remaining -= 1;
        }
        if self.frozen_turns_remaining == 0 {
            self.frozen = false;
        }
    }

    /// Strip keywords, Divine Shield, and freeze. Stat changes already
    /// applied persist.
    pub fn silence(&mut self) {
        self.silenced = true;
        self.keywords.clear();
        self.has_divine_shield = false;
        self.frozen = false;
        self.frozen_turns_remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::EffectOp;

    fn unit(keywords: &[Keyword]) -> CardInstance {
        CardInstance {
            id: EntityId::new(10),
            name: "Test Unit".to_string(),
            card_type: CardType::Unit,
            owner: PlayerId::new(0),
            mana_cost: 2,
            attack: 2,
            current_hp: 3,
            max_hp: 3,
            element: None,
            keywords: keywords.iter().cloned().collect(),
            frozen: false,
            frozen_turns_remaining: 0,
            silenced: false,
            has_divine_shield: false,
            summoning_sickness: false,
            has_attacked_this_turn: false,
            is_token: false,
            deployed_turn: 1,
        }
    }

    #[test]
    fn test_status_queries() {
        let card = unit(&[Keyword::Taunt, Keyword::PoisonTouch]);

        assert!(card.has_taunt());
        assert!(card.has_poison());
        assert!(!card.has_lifesteal());
        assert!(!card.has_double_strike());
    }

    #[test]
    fn test_can_attack_gates() {
        let mut card = unit(&[]);
        assert!(card.can_attack());

        card.has_attacked_this_turn = true;
        assert!(!card.can_attack());

        card.has_attacked_this_turn = false;
        card.frozen = true;
        assert!(!card.can_attack());

        card.frozen = false;
        card.summoning_sickness = true;
        assert!(!card.can_attack());

        card.keywords.push(Keyword::Charge);
        assert!(card.can_attack());
    }

    #[test]
    fn test_apply_buff_positive() {
        let mut card = unit(&[]);
        card.current_hp = 2; // damaged

        card.apply_buff(1, 2);

        assert_eq!(card.attack, 3);
        assert_eq!(card.max_hp, 5);
        assert_eq!(card.current_hp, 4);
    }

    #[test]
    fn test_apply_buff_negative_health() {
        let mut card = unit(&[]);

        card.apply_buff(-5, -2);

        assert_eq!(card.attack, 0);
        assert_eq!(card.max_hp, 1);
        assert_eq!(card.current_hp, 1);
    }

    #[test]
    fn test_freeze_and_tick() {
        let mut card = unit(&[]);

        card.freeze(2);
        assert!(card.frozen);
        assert_eq!(card.frozen_turns_remaining, 2);

        card.tick_freeze();
        assert!(card.frozen);

        card.tick_freeze();
        assert!(!card.frozen);
        assert_eq!(card.frozen_turns_remaining, 0);
    }

    #[test]
    fn test_freeze_zero_means_one_turn() {
        let mut card = unit(&[]);
        card.freeze(0);
        assert_eq!(card.frozen_turns_remaining, 1);
    }

    #[test]
    fn test_silence_strips_everything_transient() {
        let mut card = unit(&[
            Keyword::Taunt,
            Keyword::Deathrattle(EffectOp::DamageHero(2)),
        ]);
        card.has_divine_shield = true;
        card.freeze(2);
        card.apply_buff(2, 0);

        card.silence();

        assert!(card.silenced);
        assert!(card.keywords.is_empty());
        assert!(!card.has_divine_shield);
        assert!(!card.frozen);
        assert_eq!(card.frozen_turns_remaining, 0);
        // Stat changes persist.
        assert_eq!(card.attack, 4);
    }

    #[test]
    fn test_element_from_name() {
        assert_eq!(Element::from_name("Fire"), Some(Element::Fire));
        assert_eq!(Element::from_name("Dark"), Some(Element::Dark));
        assert_eq!(Element::from_name("Plasma"), None);
    }

    #[test]
    fn test_serialization() {
        let card = unit(&[Keyword::Taunt]);
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
