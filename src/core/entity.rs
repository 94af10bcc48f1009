//! Entity identification.
//!
//! Every card instance in a match (unit, structure, relic, or spell) gets a
//! unique `EntityId` when it is created, whether it entered through deck
//! construction or was summoned mid-match as a token. The identity persists
//! across stat mutation; a card keeps its id through buffs, damage, and zone
//! moves until it leaves the match.
//!
//! Allocation lives in `MatchState` (`alloc_entity`), which hands out ids
//! monotonically starting at [`EntityId::FIRST`].

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// First id handed out by the allocator. Zero is never a valid entity,
    /// which keeps it free as a sentinel in external protocols.
    pub const FIRST: u32 = 1;

    /// Create an entity ID from a raw value.
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

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_basics() {
        let id = EntityId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Entity(42)");
    }

    #[test]
    fn test_entity_id_from() {
        let id: EntityId = 7u32.into();
        assert_eq!(id, EntityId::new(7));
    }

    #[test]
    fn test_serialization() {
        let id = EntityId::new(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
