//! Relic destruction and the conditional chain it feeds.
//!
//! "First relic" always means the lowest index of the relic row: the
//! oldest surviving relic goes first. The boolean result feeds follow-up
//! ops in the same keyword list (`ConditionalBuff` reads it).

use crate::core::PlayerId;
use crate::state::{LogEntry, MatchState};

/// Destroy the target side's first relic. Returns whether one existed.
pub fn destroy_first_relic(state: &mut MatchState, target_side: PlayerId) -> bool {
    if state.side(target_side).relics.is_empty() {
        return false;
    }
    let relic = state.side_mut(target_side).relics.remove(0);
    state.log_event(LogEntry::RelicDestroyed {
        side: target_side,
        entity: relic.id,
    });
    state.side_mut(target_side).graveyard.push(relic);
    true
}
