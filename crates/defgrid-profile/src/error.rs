//! Profile and persistence errors.

use thiserror::Error;

use defgrid_core::catalog::TowerKind;
use defgrid_core::constants::{DECK_MAX, DECK_MIN};

/// Why a store or deck operation was refused. The profile is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("{0} is already unlocked")]
    AlreadyUnlocked(TowerKind),

    #[error("Not enough coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u32, available: u32 },

    #[error("{0} is not unlocked")]
    NotUnlocked(TowerKind),

    #[error("{0} is already in the deck")]
    AlreadyInDeck(TowerKind),

    #[error("{0} is not in the deck")]
    NotInDeck(TowerKind),

    #[error("Deck is full ({} towers max)", DECK_MAX)]
    DeckFull,

    #[error("Deck needs at least {} towers", DECK_MIN)]
    DeckTooSmall,
}

/// Failure reading or writing a stored blob.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed profile data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}
