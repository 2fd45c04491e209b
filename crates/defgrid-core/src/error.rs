//! Structured rejection reasons for player commands.

use thiserror::Error;

use crate::catalog::TowerKind;
use crate::types::{GridPos, TowerId};

/// Why a command was rejected. A rejected command never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("No tile selected")]
    NoTileSelected,

    #[error("Tile ({}, {}) is outside the grid", .0.x, .0.y)]
    OutOfBounds(GridPos),

    #[error("Cannot build on the enemy path")]
    PathCell(GridPos),

    #[error("Tile ({}, {}) is already occupied", .0.x, .0.y)]
    TileOccupied(GridPos),

    #[error("{0} is not in this run's loadout")]
    NotInLoadout(TowerKind),

    #[error("Not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },

    #[error("No tower with id {0}")]
    UnknownTower(TowerId),

    #[error("Tower is already at max level")]
    MaxLevel,

    #[error("{0} has no ability")]
    NoAbility(TowerKind),

    #[error("Ability recharging: {remaining} ticks left")]
    AbilityCoolingDown { remaining: u32 },

    #[error("The run is over; restart to continue")]
    RunOver,

    #[error("Already playing")]
    AlreadyPlaying,

    #[error("Not playing")]
    NotPlaying,
}
