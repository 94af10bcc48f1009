//! Hero record: the face each side plays for.
//!
//! The hero is not a card instance; it never occupies a slot, carries no
//! keywords, and cannot be removed. When its hp reaches 0 the match ends.

use serde::{Deserialize, Serialize};

/// Hard cap on the mana pool.
pub const MANA_CAP: i32 = 10;

/// One side's hero: hit points, mana pool, and fatigue progression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub max_mana: i32,
    /// Escalates by one with each draw from an empty deck; the hero takes
    /// the new counter value in damage each time.
    pub fatigue_counter: u32,
}

impl Hero {
    /// Create a hero at full health with an empty mana pool.
    #[must_use]
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            mana: 0,
            max_mana: 0,
            fatigue_counter: 0,
        }
    }

    /// Heal, clamped at max hp. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let healed = amount.min(self.max_hp - self.hp).max(0);
        self.hp += healed;
        healed
    }

    /// Grow the mana pool by one (turn-start ramp) and refill it.
    pub fn ramp_and_refill(&mut self) {
        self.max_mana = (self.max_mana + 1).min(MANA_CAP);
        self.mana = self.max_mana;
    }

    /// Permanently grow the mana pool without refilling spent mana.
    pub fn grow_max_mana(&mut self, amount: i32) {
        self.max_mana = (self.max_mana + amount).min(MANA_CAP).max(0);
    }

    /// Gain temporary mana this turn, capped at [`MANA_CAP`].
    pub fn gain_mana(&mut self, amount: i32) {
        self.mana = (self.mana + amount).min(MANA_CAP).max(0);
    }

    /// Spend mana; caller validates affordability first.
    pub fn spend_mana(&mut self, amount: i32) {
        debug_assert!(self.mana >= amount, "spend validated by controller");
        self.mana -= amount;
    }

    /// Take the next fatigue hit: the counter escalates, the hero loses
    /// that many hp. Fatigue bypasses damage-reduction auras.
    /// Returns the new counter value.
    pub fn take_fatigue(&mut self) -> u32 {
        self.fatigue_counter += 1;
        self.hp -= self.fatigue_counter as i32;
        self.fatigue_counter
    }
}
