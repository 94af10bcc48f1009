//! Resource effects: card draw and mana.

use crate::core::PlayerId;
use crate::state::{DrawOutcome, LogEntry, MatchState};

/// Draw `count` cards for a side, applying the full resource-exhaustion
/// rules: a full hand burns the card, an empty deck converts the draw to
/// escalating fatigue damage (which can end the match). Returns how many
/// cards actually reached the hand.
pub fn draw_cards(state: &mut MatchState, side: PlayerId, count: u32) -> u32 {
    let mut drawn = 0;
    for _ in 0..count {
        match state.side_mut(side).draw() {
            DrawOutcome::Drawn(entity) => {
                state.log_event(LogEntry::CardDrawn { side, entity });
                drawn += 1;
            }
            DrawOutcome::Burned(entity) => {
                state.log_event(LogEntry::CardBurned { side, entity });
            }
            DrawOutcome::Fatigue(counter) => {
                state.log_event(LogEntry::Fatigue { side, counter });
                state.update_win_condition();
            }
        }
        if state.is_finished() {
            break;
        }
    }
    drawn
}

/// Gain temporary mana this turn.
pub fn gain_mana(state: &mut MatchState, side: PlayerId, amount: i32) {
    if amount == 0 {
        return;
    }
    state.side_mut(side).hero.gain_mana(amount);
    state.log_event(LogEntry::ManaGained { side, amount });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardDefinition, CardId};
    use crate::core::{EntityId, PerPlayer};
    use crate::state::{CardType, Hero, MatchStatus, PlayerSide, HAND_LIMIT};

    fn fresh() -> MatchState {
        MatchState::new(PerPlayer::new(|_| PlayerSide::new(Hero::new(30))), 42)
    }

    fn deck_card(id: u32, owner: PlayerId) -> crate::state::CardInstance {
        CardDefinition::new(CardId::new(1), "C", CardType::Unit)
            .with_stats(1, 1)
            .instantiate(EntityId::new(id), owner)
    }

    #[test]
    fn test_draw_moves_cards_to_hand() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        for i in 0..5 {
            let card = deck_card(10 + i, p0);
            state.side_mut(p0).deck.push(card);
        }

        assert_eq!(draw_cards(&mut state, p0, 3), 3);
        assert_eq!(state.side(p0).hand.len(), 3);
        assert_eq!(state.side(p0).deck.len(), 2);
    }

    #[test]
    fn test_overdraw_burns_excess() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        for i in 0..HAND_LIMIT {
            let card = deck_card(i as u32, p0);
            state.side_mut(p0).hand.push(card);
        }
        for i in 0..3 {
            let card = deck_card(100 + i, p0);
            state.side_mut(p0).deck.push(card);
        }

        assert_eq!(draw_cards(&mut state, p0, 3), 0);
        assert_eq!(state.side(p0).hand.len(), HAND_LIMIT);
        assert!(state.side(p0).deck.is_empty());
        assert!(state.side(p0).graveyard.is_empty());
    }

    #[test]
    fn test_fatigue_can_end_match() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        state.side_mut(p0).hero.hp = 3;

        // 1 + 2 damage kills at the second fatigue draw; the third draw
        // never happens because the match is over.
        draw_cards(&mut state, p0, 3);

        assert_eq!(state.side(p0).hero.fatigue_counter, 2);
        assert_eq!(state.status, MatchStatus::Finished);
        assert_eq!(state.winner, Some(PlayerId::new(1)));
    }

    #[test]
    fn test_gain_mana_logs() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        state.side_mut(p0).hero.max_mana = 4;
        state.side_mut(p0).hero.mana = 1;

        gain_mana(&mut state, p0, 2);

        assert_eq!(state.side(p0).hero.mana, 3);
        assert!(state
            .log
            .iter()
            .any(|e| matches!(e, LogEntry::ManaGained { amount: 2, .. })));
    }
}
