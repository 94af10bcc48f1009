//! Targeting resolution.
//!
//! Every targeted effect resolves through the same fallback ladder: an
//! explicit specifier is matched against entity ids first, then read as a
//! zero-based slot index into the battlefield array, and if neither hits
//! (or no specifier was given) a uniformly random member of the candidate
//! pool is picked. What happens on an empty pool is the call site's
//! decision; for damage the dominant policy is redirecting to the enemy
//! hero, exposed here as [`resolve_enemy_or_hero`].

use crate::core::{EntityId, PlayerId};
use crate::state::MatchState;

/// A candidate pool: `(slot index, entity id)` pairs in slot order.
pub type Pool = Vec<(usize, EntityId)>;

/// Where a damage-style effect ended up pointing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A battlefield slot on the pool's side.
    Unit(usize),
    /// The enemy hero (empty-pool redirect).
    Hero,
}

/// All occupied enemy slots, slot order.
#[must_use]
pub fn enemy_board(state: &MatchState, side: PlayerId) -> Pool {
    board(state, side.opponent())
}

/// All occupied friendly slots, slot order.
#[must_use]
pub fn ally_board(state: &MatchState, side: PlayerId) -> Pool {
    board(state, side)
}

fn board(state: &MatchState, owner: PlayerId) -> Pool {
    state
        .side(owner)
        .occupied_slots()
        .map(|(slot, card)| (slot, card.id))
        .collect()
}

/// Resolve a specifier against a pool. Returns the chosen slot, or `None`
/// for an empty pool.
pub fn resolve_in_pool(
    state: &mut MatchState,
    specifier: Option<u32>,
    pool: &Pool,
) -> Option<usize> {
    if pool.is_empty() {
        return None;
    }

    if let Some(spec) = specifier {
        // Entity id match wins; a miss falls through to slot-index reading.
        if let Some((slot, _)) = pool.iter().find(|(_, id)| id.raw() == spec) {
            return Some(*slot);
        }
        if let Some((slot, _)) = pool.iter().find(|(slot, _)| *slot == spec as usize) {
            return Some(*slot);
        }
    }

    let index = state.rng.gen_range_usize(0..pool.len());
    Some(pool[index].0)
}

/// Resolve an enemy-facing damage target with the hero redirect: when the
/// enemy board is empty the hit goes to their hero instead of fizzling.
pub fn resolve_enemy_or_hero(
    state: &mut MatchState,
    side: PlayerId,
    specifier: Option<u32>,
) -> ResolvedTarget {
    let pool = enemy_board(state, side);
    match resolve_in_pool(state, specifier, &pool) {
        Some(slot) => ResolvedTarget::Unit(slot),
        None => ResolvedTarget::Hero,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardDefinition, CardId};
    use crate::core::PerPlayer;
    use crate::state::{CardType, Hero, PlayerSide};

    fn state_with_enemies(slots: &[(usize, u32)]) -> MatchState {
        let mut state =
            MatchState::new(PerPlayer::new(|_| PlayerSide::new(Hero::new(30))), 42);
        for &(slot, id) in slots {
            let unit = CardDefinition::new(CardId::new(1), "Dummy", CardType::Unit)
                .with_stats(1, 1)
                .instantiate(EntityId::new(id), PlayerId::new(1));
            state.side_mut(PlayerId::new(1)).place(slot, unit);
        }
        state
    }

    #[test]
    fn test_entity_id_match_first() {
        let mut state = state_with_enemies(&[(0, 10), (3, 11)]);
        let pool = enemy_board(&state, PlayerId::new(0));

        assert_eq!(resolve_in_pool(&mut state, Some(11), &pool), Some(3));
    }

    #[test]
    fn test_slot_index_fallback() {
        // Specifier 3 matches no entity id, but slot 3 is populated.
        let mut state = state_with_enemies(&[(0, 10), (3, 11)]);
        let pool = enemy_board(&state, PlayerId::new(0));

        assert_eq!(resolve_in_pool(&mut state, Some(3), &pool), Some(3));
    }

    #[test]
    fn test_id_beats_slot_reading() {
        // 0 is both a missing id and a populated slot; ids are checked
        // first, so the slot read wins only after the id misses.
        let mut state = state_with_enemies(&[(0, 10), (1, 11)]);
        let pool = enemy_board(&state, PlayerId::new(0));

        assert_eq!(resolve_in_pool(&mut state, Some(10), &pool), Some(0));
        assert_eq!(resolve_in_pool(&mut state, Some(1), &pool), Some(1));
    }

    #[test]
    fn test_unmatched_specifier_goes_random() {
        let mut state = state_with_enemies(&[(2, 10)]);
        let pool = enemy_board(&state, PlayerId::new(0));

        // 99 matches nothing; the only member must come back.
        assert_eq!(resolve_in_pool(&mut state, Some(99), &pool), Some(2));
    }

    #[test]
    fn test_no_specifier_picks_from_pool() {
        let mut state = state_with_enemies(&[(1, 10), (4, 11)]);
        let pool = enemy_board(&state, PlayerId::new(0));

        for _ in 0..20 {
            let slot = resolve_in_pool(&mut state, None, &pool).unwrap();
            assert!(slot == 1 || slot == 4);
        }
    }

    #[test]
    fn test_empty_pool_is_none() {
        let mut state = state_with_enemies(&[]);
        let pool = enemy_board(&state, PlayerId::new(0));

        assert_eq!(resolve_in_pool(&mut state, Some(5), &pool), None);
        assert_eq!(resolve_in_pool(&mut state, None, &pool), None);
    }

    #[test]
    fn test_hero_redirect() {
        let mut state = state_with_enemies(&[]);
        assert_eq!(
            resolve_enemy_or_hero(&mut state, PlayerId::new(0), None),
            ResolvedTarget::Hero
        );

        let mut state = state_with_enemies(&[(2, 10)]);
        assert_eq!(
            resolve_enemy_or_hero(&mut state, PlayerId::new(0), Some(10)),
            ResolvedTarget::Unit(2)
        );
    }
}
