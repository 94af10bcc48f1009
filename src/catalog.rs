//! Card catalog - static card definitions.
//!
//! `CardDefinition` holds the immutable properties of a card: cost, base
//! stats, element, and the keyword identifiers that describe its behavior.
//! Keyword strings are parsed exactly once, at registration; unrecognized
//! identifiers are dropped there and never seen again.
//!
//! The catalog itself is supplied by the surrounding service (the engine
//! ships [`starter_set`] for tests and integration examples) and is read
//! only at instance-creation time: once a `CardInstance` exists it carries
//! everything it needs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId};
use crate::keywords::{parse_keyword, KeywordList};
use crate::state::{CardInstance, CardType, Element};

/// Unique identifier for a card definition (the card "type", not an
/// instance in a match).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub card_type: CardType,
    pub mana_cost: i32,
    /// Base attack; 0 for structures, relics, and spells.
    pub attack: i32,
    /// Base hp; 0 for spells.
    pub health: i32,
    pub element: Option<Element>,
    /// Parsed at registration; drives all behavior.
    pub keywords: KeywordList,
}

impl CardDefinition {
    /// Create a new definition with no stats or keywords.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            mana_cost: 0,
            attack: 0,
            health: 0,
            element: None,
            keywords: SmallVec::new(),
        }
    }

    /// Set the mana cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.mana_cost = cost;
        self
    }

    /// Set attack and health (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, attack: i32, health: i32) -> Self {
        self.attack = attack;
        self.health = health;
        self
    }

    /// Set the element tag (builder pattern).
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    /// Add a keyword identifier (builder pattern). Unrecognized
    /// identifiers are dropped here, silently.
    #[must_use]
    pub fn with_keyword(mut self, identifier: &str) -> Self {
        if let Some(keyword) = parse_keyword(identifier) {
            self.keywords.push(keyword);
        }
        self
    }

    /// Build a playable instance of this card.
    ///
    /// The divine-shield flag is seeded from the keyword list; everything
    /// else starts in its resting state. `deployed_turn` is stamped when
    /// the card actually hits the battlefield.
    #[must_use]
    pub fn instantiate(&self, id: EntityId, owner: PlayerId) -> CardInstance {
        CardInstance {
            id,
            name: self.name.clone(),
            card_type: self.card_type,
            owner,
            mana_cost: self.mana_cost,
            attack: self.attack,
            current_hp: self.health,
            max_hp: self.health,
            element: self.element,
            keywords: self.keywords.clone(),
            frozen: false,
            frozen_turns_remaining: 0,
            silenced: false,
            has_divine_shield: self
                .keywords
                .contains(&crate::keywords::Keyword::DivineShield),
            summoning_sickness: false,
            has_attacked_this_turn: false,
            is_token: false,
            deployed_turn: 0,
        }
    }
}

/// Registry of card definitions.
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    definitions: FxHashMap<CardId, CardDefinition>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one with the same id.
    pub fn register(&mut self, definition: CardDefinition) {
        self.definitions.insert(definition.id, definition);
    }

    /// Look up a definition.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.definitions.get(&id)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate all definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.definitions.values()
    }
}

/// A small playable card set covering every keyword category. Used by the
/// integration tests and useful as authoring reference.
#[must_use]
pub fn starter_set() -> CardCatalog {
    let mut catalog = CardCatalog::new();

    catalog.register(
        CardDefinition::new(CardId::new(1), "Ember Whelp", CardType::Unit)
            .with_cost(1)
            .with_stats(2, 1)
            .with_element(Element::Fire),
    );
    catalog.register(
        CardDefinition::new(CardId::new(2), "Bog Sentinel", CardType::Unit)
            .with_cost(2)
            .with_stats(1, 4)
            .with_element(Element::Earth)
            .with_keyword("Taunt"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(3), "Grave Tender", CardType::Unit)
            .with_cost(3)
            .with_stats(2, 2)
            .with_keyword("Deathrattle:SummonHusk1_1x2"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(4), "Flame Herald", CardType::Unit)
            .with_cost(3)
            .with_stats(3, 2)
            .with_element(Element::Fire)
            .with_keyword("Battlecry:Damage2"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(5), "Shield Acolyte", CardType::Unit)
            .with_cost(2)
            .with_stats(2, 2)
            .with_element(Element::Light)
            .with_keyword("DivineShield"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(6), "Marsh Leech", CardType::Unit)
            .with_cost(4)
            .with_stats(3, 3)
            .with_element(Element::Water)
            .with_keyword("Lifesteal"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(7), "Fang Adder", CardType::Unit)
            .with_cost(3)
            .with_stats(1, 2)
            .with_keyword("Poison"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(8), "Twinblade Duelist", CardType::Unit)
            .with_cost(5)
            .with_stats(3, 4)
            .with_element(Element::Wind)
            .with_keyword("DoubleStrike"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(9), "Frost Revenant", CardType::Unit)
            .with_cost(4)
            .with_stats(2, 5)
            .with_element(Element::Water)
            .with_keyword("OnDamage:FreezeAttacker"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(10), "Reliquary Raider", CardType::Unit)
            .with_cost(4)
            .with_stats(3, 3)
            .with_keyword("Battlecry:ConditionalRelicDestroy")
            .with_keyword("Battlecry:ConditionalBuff+2+2"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(11), "Dawn Chaplain", CardType::Unit)
            .with_cost(3)
            .with_stats(2, 3)
            .with_element(Element::Light)
            .with_keyword("Trigger:OnHealDamageRandomEnemy1"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(12), "Stormcaller", CardType::Unit)
            .with_cost(5)
            .with_stats(4, 4)
            .with_element(Element::Wind)
            .with_keyword("Passive:OnSpellCastDraw1"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(13), "Rally Captain", CardType::Unit)
            .with_cost(4)
            .with_stats(2, 3)
            .with_keyword("Battlecry:BuffAllies+1+1"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(14), "Vanguard Rider", CardType::Unit)
            .with_cost(3)
            .with_stats(2, 1)
            .with_keyword("Charge"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(15), "Night Regent", CardType::Unit)
            .with_cost(6)
            .with_stats(4, 5)
            .with_element(Element::Dark)
            .with_keyword("EndOfTurn:DamageRandomEnemy1")
            .with_keyword("TurnStart:BuffSelf+1+0"),
    );

    catalog.register(
        CardDefinition::new(CardId::new(20), "Pyre Obelisk", CardType::Structure)
            .with_cost(3)
            .with_stats(0, 4)
            .with_element(Element::Fire)
            .with_keyword("Structure:BuffTribeFireAtk+1"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(21), "Bulwark Gate", CardType::Structure)
            .with_cost(4)
            .with_stats(0, 5)
            .with_keyword("Structure:ReduceDamage1")
            .with_keyword("Taunt"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(22), "Spring Fountain", CardType::Structure)
            .with_cost(2)
            .with_stats(0, 3)
            .with_element(Element::Water)
            .with_keyword("Structure:TurnHealHero2"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(23), "Watch Beacon", CardType::Structure)
            .with_cost(3)
            .with_stats(0, 3)
            .with_keyword("Structure:TurnPing1"),
    );

    catalog.register(
        CardDefinition::new(CardId::new(30), "Chrono Prism", CardType::Relic)
            .with_cost(2)
            .with_keyword("Relic:TurnManaRamp3"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(31), "War Banner", CardType::Relic)
            .with_cost(3)
            .with_keyword("Relic:BuffAllAtk+1"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(32), "Trickster Totem", CardType::Relic)
            .with_cost(2)
            .with_keyword("Relic:TurnBuffRandom+1+1"),
    );

    catalog.register(
        CardDefinition::new(CardId::new(40), "Fire Lance", CardType::Spell)
            .with_cost(2)
            .with_element(Element::Fire)
            .with_keyword("Spell:Damage3"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(41), "Glacial Bind", CardType::Spell)
            .with_cost(1)
            .with_element(Element::Water)
            .with_keyword("Spell:FreezeTarget"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(42), "Cinder Storm", CardType::Spell)
            .with_cost(4)
            .with_element(Element::Fire)
            .with_keyword("Spell:DamageAllEnemies2"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(43), "Mending Rain", CardType::Spell)
            .with_cost(2)
            .with_element(Element::Water)
            .with_keyword("Spell:HealAllAllies2"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(44), "Hush", CardType::Spell)
            .with_cost(1)
            .with_keyword("Spell:Silence"),
    );
    catalog.register(
        CardDefinition::new(CardId::new(45), "Second Wind", CardType::Spell)
            .with_cost(3)
            .with_keyword("Spell:Draw2"),
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::{EffectOp, Keyword};

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_definition_builder() {
        let def = CardDefinition::new(CardId::new(1), "Test", CardType::Unit)
            .with_cost(3)
            .with_stats(2, 4)
            .with_element(Element::Fire)
            .with_keyword("Taunt")
            .with_keyword("Battlecry:Damage2");

        assert_eq!(def.mana_cost, 3);
        assert_eq!(def.attack, 2);
        assert_eq!(def.health, 4);
        assert_eq!(def.element, Some(Element::Fire));
        assert_eq!(def.keywords.len(), 2);
    }

    #[test]
    fn test_unknown_keyword_dropped_at_registration() {
        let def = CardDefinition::new(CardId::new(1), "Test", CardType::Unit)
            .with_keyword("Battlecry:SomethingNew")
            .with_keyword("Taunt");

        assert_eq!(def.keywords.len(), 1);
        assert_eq!(def.keywords[0], Keyword::Taunt);
    }

    #[test]
    fn test_instantiate() {
        let def = CardDefinition::new(CardId::new(5), "Shielded", CardType::Unit)
            .with_cost(2)
            .with_stats(2, 2)
            .with_keyword("DivineShield");

        let card = def.instantiate(EntityId::new(7), PlayerId::new(1));

        assert_eq!(card.id, EntityId::new(7));
        assert_eq!(card.owner, PlayerId::new(1));
        assert_eq!(card.current_hp, 2);
        assert_eq!(card.max_hp, 2);
        assert!(card.has_divine_shield);
        assert!(!card.is_token);
        assert!(!card.summoning_sickness);
    }

    #[test]
    fn test_catalog_register_and_get() {
        let mut catalog = CardCatalog::new();
        assert!(catalog.is_empty());

        catalog.register(CardDefinition::new(CardId::new(1), "A", CardType::Unit));
        catalog.register(CardDefinition::new(CardId::new(2), "B", CardType::Spell));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "A");
        assert!(catalog.get(CardId::new(99)).is_none());
    }

    #[test]
    fn test_starter_set_parses_cleanly() {
        let catalog = starter_set();
        assert!(catalog.len() >= 20);

        // Every non-vanilla definition kept its keywords: nothing in the
        // set relies on an identifier the parser rejects.
        let raider = catalog.get(CardId::new(10)).unwrap();
        assert_eq!(raider.keywords.len(), 2);
        assert_eq!(raider.keywords[0], Keyword::Battlecry(EffectOp::ConditionalRelicDestroy));

        let lance = catalog.get(CardId::new(40)).unwrap();
        assert_eq!(lance.keywords[0], Keyword::Spell(EffectOp::Damage(3)));
    }
}
