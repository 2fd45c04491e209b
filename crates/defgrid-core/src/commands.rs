//! Player commands sent from the host to the simulation.
//!
//! Commands are applied between ticks, either immediately through
//! `SimulationEngine::execute` or queued for the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::catalog::TowerKind;
use crate::enums::{Ability, Difficulty};
use crate::types::{GridPos, TowerId};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Selection ---
    /// Select a tile; selecting the selected tile again clears it.
    SelectTile { x: i32, y: i32 },
    /// Clear the tile selection.
    DeselectTile,

    // --- Towers ---
    /// Build a tower of the given kind on the selected tile.
    Build { kind: TowerKind },
    /// Upgrade a tower by one level.
    Upgrade { tower_id: TowerId },
    /// Sell a tower for a partial refund.
    Sell { tower_id: TowerId },
    /// Trigger a tower's ability.
    UseAbility { tower_id: TowerId },

    // --- Run control ---
    /// Start the run, or resume it when paused.
    StartOrResume,
    /// Pause the run.
    Pause,
    /// Record the current run and start a fresh one.
    Restart,
    /// Difficulty applied by the next restart.
    SetDifficulty { difficulty: Difficulty },
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandOutcome {
    TileSelected { tile: Option<GridPos> },
    Built { tower_id: TowerId, kind: TowerKind, cost: u32 },
    Upgraded { tower_id: TowerId, level: u32, cost: u32 },
    Sold { tower_id: TowerId, refund: u32 },
    AbilityUsed { tower_id: TowerId, ability: Ability, targets: usize },
    Started,
    Paused,
    Restarted,
    DifficultySet { difficulty: Difficulty },
}

impl std::fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandOutcome::TileSelected { tile: Some(t) } => {
                write!(f, "Selected ({}, {})", t.x, t.y)
            }
            CommandOutcome::TileSelected { tile: None } => f.write_str("Selection cleared"),
            CommandOutcome::Built { kind, cost, .. } => {
                write!(f, "{} built for {} gold", kind.stats().name, cost)
            }
            CommandOutcome::Upgraded { level, cost, .. } => {
                write!(f, "Upgraded to level {} for {} gold", level, cost)
            }
            CommandOutcome::Sold { refund, .. } => write!(f, "Sold for {} gold", refund),
            CommandOutcome::AbilityUsed {
                ability, targets, ..
            } => write!(f, "{} ({} targets)", ability.label(), targets),
            CommandOutcome::Started => f.write_str("Playing"),
            CommandOutcome::Paused => f.write_str("Paused"),
            CommandOutcome::Restarted => f.write_str("New run started"),
            CommandOutcome::DifficultySet { difficulty } => {
                write!(f, "Difficulty {:?} applies from the next restart", difficulty)
            }
        }
    }
}
