//! Keyword identifier parsing.
//!
//! One pass over each identifier at card-load time. The grammar is
//! `Category:EffectName[Params]` for effectful keywords and a bare name
//! for flat statuses. Aliases observed in content are normalized here:
//! `EndTurn` folds into `EndOfTurn`, and the `OnDamage:Freeze` /
//! `OnDamage:FreezeAttacker` / `OnDamageEnemy:Freeze` family all mean
//! "freeze whatever damaged me".

use super::ops::{Aura, EffectOp, TurnAura};
use super::{Keyword, KeywordList};
use crate::state::Element;

/// Parse one keyword identifier. Returns `None` for anything the engine
/// does not recognize; callers drop those silently.
#[must_use]
pub fn parse_keyword(identifier: &str) -> Option<Keyword> {
    let identifier = identifier.trim();
    let Some((category, body)) = identifier.split_once(':') else {
        return parse_status(identifier);
    };

    match category {
        "Battlecry" => parse_effect_op(body, OpContext::General).map(Keyword::Battlecry),
        "Deathrattle" => parse_effect_op(body, OpContext::General).map(Keyword::Deathrattle),
        "Spell" => parse_effect_op(body, OpContext::General).map(Keyword::Spell),
        "OnAttack" => parse_effect_op(body, OpContext::General).map(Keyword::OnAttack),
        "AfterAttack" => parse_effect_op(body, OpContext::General).map(Keyword::AfterAttack),
        "OnDamage" | "OnDamageTaken" | "OnDamageEnemy" => {
            parse_effect_op(body, OpContext::OnDamage).map(Keyword::OnDamageTaken)
        }
        "TurnStart" => parse_effect_op(body, OpContext::General).map(Keyword::TurnStart),
        "EndOfTurn" | "EndTurn" => parse_effect_op(body, OpContext::General).map(Keyword::EndOfTurn),
        "Trigger" | "Passive" => parse_reactive(body),
        "Structure" | "Relic" => parse_aura(body),
        _ => None,
    }
}

/// Parse a batch of identifiers, dropping everything unrecognized.
#[must_use]
pub fn parse_keyword_list<S: AsRef<str>>(identifiers: &[S]) -> KeywordList {
    identifiers
        .iter()
        .filter_map(|s| parse_keyword(s.as_ref()))
        .collect()
}

fn parse_status(name: &str) -> Option<Keyword> {
    // Content is inconsistent about casing and separators for statuses
    // ("taunt", "DivineShield", "Poison-Touch"); normalize before matching.
    let normalized: String = name
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.as_str() {
        "taunt" => Some(Keyword::Taunt),
        "divineshield" => Some(Keyword::DivineShield),
        "lifesteal" => Some(Keyword::Lifesteal),
        "poison" => Some(Keyword::Poison),
        "poisontouch" => Some(Keyword::PoisonTouch),
        "doublestrike" => Some(Keyword::DoubleStrike),
        "charge" => Some(Keyword::Charge),
        _ => None,
    }
}

/// Where an effect body appeared, for resolving the ambiguous `Freeze`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum OpContext {
    General,
    OnDamage,
}

fn parse_effect_op(body: &str, ctx: OpContext) -> Option<EffectOp> {
    // Longest name first: several names share prefixes.
    if let Some(rest) = body.strip_prefix("DamageAllEnemies") {
        return Some(EffectOp::DamageAllEnemies(int_param(rest, 0)));
    }
    if let Some(rest) = body
        .strip_prefix("DamageAllUnits")
        .or_else(|| body.strip_prefix("DamageAll"))
    {
        return Some(EffectOp::DamageAllUnits(int_param(rest, 0)));
    }
    if let Some(rest) = body.strip_prefix("DamageRandomEnemy") {
        return Some(EffectOp::DamageRandomEnemy(int_param(rest, 0)));
    }
    if let Some(rest) = body.strip_prefix("DamageHero") {
        return Some(EffectOp::DamageHero(int_param(rest, 0)));
    }
    if let Some(rest) = body.strip_prefix("Damage") {
        return Some(EffectOp::Damage(int_param(rest, 0)));
    }
    if let Some(rest) = body
        .strip_prefix("HealAllAllies")
        .or_else(|| body.strip_prefix("HealAll"))
    {
        return Some(EffectOp::HealAllAllies(int_param(rest, 0)));
    }
    if let Some(rest) = body.strip_prefix("HealHero") {
        return Some(EffectOp::HealHero(int_param(rest, 0)));
    }
    if let Some(rest) = body.strip_prefix("Heal") {
        return Some(EffectOp::Heal(int_param(rest, 0)));
    }
    if let Some(rest) = body.strip_prefix("Draw") {
        return Some(EffectOp::Draw(int_param(rest, 1).max(0) as u32));
    }
    if let Some(rest) = body.strip_prefix("GainMana") {
        return Some(EffectOp::GainMana(int_param(rest, 1)));
    }
    if let Some(rest) = body.strip_prefix("Summon") {
        return Some(parse_summon(rest));
    }
    if body.starts_with("ConditionalRelicDestroy") || body.starts_with("DestroyRelic") {
        return Some(EffectOp::ConditionalRelicDestroy);
    }
    if let Some(rest) = body.strip_prefix("ConditionalBuff") {
        let (attack, health) = signed_pair(rest);
        return Some(EffectOp::ConditionalBuff { attack, health });
    }
    if let Some(rest) = body.strip_prefix("BuffAllies") {
        let (attack, health) = signed_pair(rest);
        return Some(EffectOp::BuffAllies { attack, health });
    }
    if let Some(rest) = body.strip_prefix("BuffRandomAlly") {
        let (attack, health) = signed_pair(rest);
        return Some(EffectOp::BuffRandomAlly { attack, health });
    }
    if let Some(rest) = body.strip_prefix("BuffSelf") {
        let (attack, health) = signed_pair(rest);
        return Some(EffectOp::BuffSelf { attack, health });
    }
    if let Some(rest) = body.strip_prefix("BuffTarget") {
        let (attack, health) = signed_pair(rest);
        return Some(EffectOp::BuffTarget { attack, health });
    }
    if body == "GiveDivineShield" || body == "GiveShield" {
        return Some(EffectOp::GiveDivineShield);
    }
    if let Some(rest) = body.strip_prefix("FreezeTarget") {
        return Some(EffectOp::FreezeTarget {
            turns: int_param(rest, 1).max(0) as u32,
        });
    }
    if let Some(rest) = body.strip_prefix("FreezeAttacker") {
        return Some(EffectOp::FreezeAttacker {
            turns: int_param(rest, 1).max(0) as u32,
        });
    }
    if let Some(rest) = body.strip_prefix("Freeze") {
        // Bare `Freeze` in an OnDamage context means "freeze the source";
        // anywhere else it reads as a targeted freeze.
        let turns = int_param(rest, 1).max(0) as u32;
        return Some(match ctx {
            OpContext::OnDamage => EffectOp::FreezeAttacker { turns },
            OpContext::General => EffectOp::FreezeTarget { turns },
        });
    }
    if body == "Silence" || body == "SilenceTarget" {
        return Some(EffectOp::Silence);
    }
    if body == "Destroy" || body == "DestroyTarget" {
        return Some(EffectOp::DestroyTarget);
    }
    None
}

fn parse_reactive(body: &str) -> Option<Keyword> {
    if let Some(rest) = body.strip_prefix("OnHeal") {
        return parse_effect_op(rest, OpContext::General).map(Keyword::OnHeal);
    }
    if let Some(rest) = body
        .strip_prefix("OnSpellCast")
        .or_else(|| body.strip_prefix("OnSpell"))
    {
        return parse_effect_op(rest, OpContext::General).map(Keyword::OnSpellCast);
    }
    None
}

fn parse_aura(body: &str) -> Option<Keyword> {
    if let Some(rest) = body.strip_prefix("BuffTribe") {
        // BuffTribeFireAtk+1
        let (element_name, bonus_part) = rest.split_once("Atk")?;
        let element = Element::from_name(element_name)?;
        return Some(Keyword::Aura(Aura::TribeAttack {
            element,
            bonus: int_param(bonus_part, 0),
        }));
    }
    if let Some(rest) = body.strip_prefix("BuffAllAtk") {
        return Some(Keyword::Aura(Aura::AllAttack {
            bonus: int_param(rest, 0),
        }));
    }
    if let Some(rest) = body.strip_prefix("ReduceDamage") {
        return Some(Keyword::Aura(Aura::DamageReduction {
            amount: int_param(rest, 0),
        }));
    }
    if let Some(rest) = body.strip_prefix("TurnHealHero") {
        return Some(Keyword::TurnAura(TurnAura::HealHero(int_param(rest, 0))));
    }
    if let Some(rest) = body.strip_prefix("TurnPing") {
        return Some(Keyword::TurnAura(TurnAura::PingRandomEnemy(int_param(
            rest, 0,
        ))));
    }
    if let Some(rest) = body.strip_prefix("TurnManaRamp") {
        let period = int_param(rest, 3);
        return Some(Keyword::TurnAura(TurnAura::ManaRampCycle {
            period: if period <= 0 { 3 } else { period as u32 },
        }));
    }
    if let Some(rest) = body.strip_prefix("TurnBuffRandom") {
        let (attack, health) = signed_pair(rest);
        return Some(Keyword::TurnAura(TurnAura::RandomAllyBuff {
            attack,
            health,
        }));
    }
    None
}

/// Token body: `Husk1_1x3` = name, attack, `_`, health, optional `x` count.
/// Malformed stats fall back to 0 (the summon handler then skips a token
/// with no health); a missing count means one token.
fn parse_summon(rest: &str) -> EffectOp {
    let name_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map_or(rest.len(), |(i, _)| i);
    let name = if name_end == 0 {
        "Token".to_string()
    } else {
        rest[..name_end].to_string()
    };
    let stats = &rest[name_end..];

    let (attack_part, tail) = match stats.split_once('_') {
        Some((a, t)) => (a, t),
        None => (stats, ""),
    };
    let (health_part, count_part) = match tail.split_once('x') {
        Some((h, c)) => (h, c),
        None => (tail, ""),
    };

    EffectOp::SummonToken {
        name,
        attack: int_param(attack_part, 0),
        health: int_param(health_part, 0),
        count: int_param(count_part, 1).max(0) as u32,
    }
}

/// Parse a trailing integer parameter; empty or malformed falls back.
/// Accepts an optional leading sign (`+1`, `-2`).
fn int_param(s: &str, default: i32) -> i32 {
    if s.is_empty() {
        default
    } else {
        s.parse().unwrap_or(default)
    }
}

/// Parse a `+a+h` pair (`+1+1`, `+2-1`). A single value reads as attack
/// only; anything malformed falls back to 0.
fn signed_pair(s: &str) -> (i32, i32) {
    let second_sign = s
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '+' || *c == '-')
        .map(|(i, _)| i);

    match second_sign {
        Some(i) => (int_param(&s[..i], 0), int_param(&s[i..], 0)),
        None => (int_param(s, 0), 0),
    }
}
