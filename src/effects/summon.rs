//! Token summoning.
//!
//! Tokens are created directly on the battlefield, never pass through the
//! hand, and always arrive with summoning sickness. A full battlefield is
//! not an error: the remaining tokens are simply skipped.

use smallvec::SmallVec;

use crate::core::PlayerId;
use crate::state::{CardInstance, CardType, LogEntry, MatchState};

/// Summon `count` copies of a token into the lowest-index empty slots of
/// `side`. Returns how many actually materialized.
///
/// A token with no health (malformed stats parse to 0) summons nothing.
pub fn summon_token(
    state: &mut MatchState,
    side: PlayerId,
    name: &str,
    attack: i32,
    health: i32,
    count: u32,
) -> u32 {
    if health <= 0 {
        return 0;
    }

    let mut summoned = 0;
    for _ in 0..count {
        let Some(slot) = state.side(side).first_empty_slot() else {
            break;
        };
        let id = state.alloc_entity();
        let token = CardInstance {
            id,
            name: name.to_string(),
            card_type: CardType::Unit,
            owner: side,
            mana_cost: 0,
            attack: attack.max(0),
            current_hp: health,
            max_hp: health,
            element: None,
            keywords: SmallVec::new(),
            frozen: false,
            frozen_turns_remaining: 0,
            silenced: false,
            has_divine_shield: false,
            summoning_sickness: true,
            has_attacked_this_turn: false,
            is_token: true,
            deployed_turn: state.turn_number,
        };
        state.side_mut(side).place(slot, token);
        state.log_event(LogEntry::Summoned {
            side,
            entity: id,
            slot,
        });
        summoned += 1;
    }
    summoned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardDefinition, CardId};
    use crate::core::{EntityId, PerPlayer};
    use crate::state::{Hero, PlayerSide, BATTLEFIELD_SLOTS};

    fn fresh() -> MatchState {
        MatchState::new(PerPlayer::new(|_| PlayerSide::new(Hero::new(30))), 42)
    }

    #[test]
    fn test_tokens_fill_lowest_slots() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);

        let blocker = CardDefinition::new(CardId::new(1), "B", CardType::Unit)
            .with_stats(1, 1)
            .instantiate(EntityId::new(100), p0);
        state.side_mut(p0).place(1, blocker);

        assert_eq!(summon_token(&mut state, p0, "Husk", 1, 1, 2), 2);

        assert_eq!(state.side(p0).unit(0).unwrap().name, "Husk");
        assert_eq!(state.side(p0).unit(2).unwrap().name, "Husk");
        assert!(state.side(p0).unit(0).unwrap().summoning_sickness);
        assert!(state.side(p0).unit(0).unwrap().is_token);
    }

    #[test]
    fn test_full_battlefield_skips_rest() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);

        assert_eq!(
            summon_token(&mut state, p0, "Husk", 1, 1, 10),
            BATTLEFIELD_SLOTS as u32
        );
        assert_eq!(state.side(p0).board_count(), BATTLEFIELD_SLOTS);

        // No room left at all: zero summons, still no error.
        assert_eq!(summon_token(&mut state, p0, "Husk", 1, 1, 1), 0);
    }

    #[test]
    fn test_zero_health_token_is_skipped() {
        let mut state = fresh();
        assert_eq!(summon_token(&mut state, PlayerId::new(0), "Husk", 1, 0, 3), 0);
        assert_eq!(state.side(PlayerId::new(0)).board_count(), 0);
    }

    #[test]
    fn test_token_ids_are_fresh() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);

        summon_token(&mut state, p0, "Husk", 1, 1, 2);

        let a = state.side(p0).unit(0).unwrap().id;
        let b = state.side(p0).unit(1).unwrap().id;
        assert_ne!(a, b);
    }
}
