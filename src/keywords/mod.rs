//! Keyword system.
//!
//! Card behavior is authored as `Category:EffectName[Params]` string
//! identifiers (e.g. `Battlecry:Damage2`, `Deathrattle:SummonHusk1_1x3`,
//! `Structure:BuffTribeFireAtk+1`). The strings are parsed exactly once,
//! at card-load time, into the tagged [`Keyword`] enum; the rest of the
//! engine never touches the text form again.
//!
//! Unknown identifiers and unknown effect names parse to nothing and are
//! silently dropped - deliberate forward-compatibility with new content,
//! not an error. Malformed numeric parameters fall back to documented
//! defaults (usually 0) instead of failing the parse.

mod ops;
mod parse;

pub use ops::{Aura, EffectOp, TurnAura};
pub use parse::{parse_keyword, parse_keyword_list};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A parsed keyword: either a flat status or a category carrying an
/// effect payload.
///
/// Execution order within one entity's keyword list is list order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyword {
    // === Flat statuses ===
    /// Must be attacked before other entities on its side.
    Taunt,
    /// Grants the divine-shield flag at creation.
    DivineShield,
    /// Damage dealt heals the controller's hero.
    Lifesteal,
    /// Any damage dealt is lethal to units.
    Poison,
    /// Alias of Poison kept as its own identifier in content.
    PoisonTouch,
    /// A second damage exchange in the same attack.
    DoubleStrike,
    /// May attack the turn it is deployed.
    Charge,

    // === Effectful categories ===
    /// Resolved once when the card is deployed from hand.
    Battlecry(EffectOp),
    /// Resolved once when the entity is destroyed.
    Deathrattle(EffectOp),
    /// Resolved when the card is cast as a spell.
    Spell(EffectOp),
    /// Fires on the attacker before damage is computed.
    OnAttack(EffectOp),
    /// Fires on the attacker after the whole exchange.
    AfterAttack(EffectOp),
    /// Fires on an entity that received damage, once per damage event.
    OnDamageTaken(EffectOp),
    /// Fires at the owner's turn start.
    TurnStart(EffectOp),
    /// Fires at the owner's turn end.
    EndOfTurn(EffectOp),
    /// Fires after any heal resolves on the owner's side.
    OnHeal(EffectOp),
    /// Fires after the owner casts a spell.
    OnSpellCast(EffectOp),

    // === Auras (structures and relics) ===
    /// Read-time stat modifier; never written into unit stats.
    Aura(Aura),
    /// Always-on per-turn effect, run at the owner's turn start.
    TurnAura(TurnAura),
}

/// Inline keyword list as stored on card definitions and instances.
pub type KeywordList = SmallVec<[Keyword; 4]>;
