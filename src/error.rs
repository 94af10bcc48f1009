//! Error taxonomy.
//!
//! Validation errors are the engine's only failure path: every one of them
//! is raised before any state mutation, so a rejected action leaves the
//! match record untouched. Everything else the rules define a fallback for
//! (missing targets, unknown keywords, resource exhaustion) and is not an
//! error.

use crate::core::PlayerId;
use crate::state::Phase;

/// Why a player action was rejected.
///
/// Raised by the match controller before any mutation; the caller can show
/// these to the acting player verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// The match has already finished.
    MatchFinished,
    /// The acting player is not the active player.
    NotActivePlayer(PlayerId),
    /// The current phase does not admit this action.
    WrongPhase(Phase),
    /// Not enough mana for the card.
    InsufficientMana { required: i32, available: i32 },
    /// Hand index out of range.
    InvalidHandIndex(usize),
    /// Battlefield slot index out of range.
    InvalidSlot(usize),
    /// Battlefield slot already holds an entity.
    SlotOccupied(usize),
    /// No empty battlefield slot to deploy into.
    BattlefieldFull,
    /// The card cannot be played this way (e.g. deploying a spell).
    WrongCardType,
    /// No unit with this id on the acting side's battlefield.
    UnknownAttacker,
    /// Attack target could not be resolved to a live enemy entity.
    InvalidTarget,
    /// The attacker has already attacked this turn.
    UnitExhausted,
    /// The attacker is frozen.
    UnitFrozen,
    /// The attacker was deployed this turn and lacks Charge.
    SummoningSickness,
    /// The attacker has no attack value to swing with.
    ZeroAttack,
    /// An enemy Taunt unit must be attacked first.
    TauntInTheWay,
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MatchFinished => write!(f, "match is already finished"),
            Self::NotActivePlayer(p) => write!(f, "{} is not the active player", p),
            Self::WrongPhase(phase) => write!(f, "action not legal in {:?} phase", phase),
            Self::InsufficientMana {
                required,
                available,
            } => write!(f, "need {} mana, have {}", required, available),
            Self::InvalidHandIndex(i) => write!(f, "no card at hand index {}", i),
            Self::InvalidSlot(i) => write!(f, "battlefield slot {} out of range", i),
            Self::SlotOccupied(i) => write!(f, "battlefield slot {} is occupied", i),
            Self::BattlefieldFull => write!(f, "no empty battlefield slot"),
            Self::WrongCardType => write!(f, "card type does not admit this action"),
            Self::UnknownAttacker => write!(f, "attacker not found on the battlefield"),
            Self::InvalidTarget => write!(f, "attack target not found"),
            Self::UnitExhausted => write!(f, "unit has already attacked this turn"),
            Self::UnitFrozen => write!(f, "unit is frozen"),
            Self::SummoningSickness => write!(f, "unit cannot attack the turn it was deployed"),
            Self::ZeroAttack => write!(f, "unit has no attack"),
            Self::TauntInTheWay => write!(f, "an enemy Taunt unit must be attacked first"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Errors from the match-record persistence seam.
#[derive(Debug)]
pub enum StoreError {
    /// No record under this match id.
    NotFound,
    /// Serialization or deserialization failed.
    Codec(bincode::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "match record not found"),
            Self::Codec(err) => write!(f, "match record codec error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound => None,
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        Self::Codec(err)
    }
}
