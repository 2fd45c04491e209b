//! Notifications emitted by the simulation for audio and UI feedback.
//!
//! Fire-and-forget: the simulation never reads anything back from them.

use serde::{Deserialize, Serialize};

use crate::catalog::{EnemyKind, TowerKind};
use crate::commands::PlayerCommand;
use crate::enums::{Ability, Achievement};
use crate::types::{EnemyId, TowerId};

/// Cue for the host's sound and effect layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// A tower fired a projectile.
    ShotFired { tower_id: TowerId },
    /// A projectile struck an enemy.
    HitLanded { enemy_id: EnemyId, damage: u32 },
    /// A tower was placed.
    TowerBuilt { tower_id: TowerId, kind: TowerKind },
    /// A tower gained a level.
    TowerUpgraded { tower_id: TowerId, level: u32 },
    /// An enemy died.
    EnemyKilled {
        enemy_id: EnemyId,
        kind: EnemyKind,
        reward: u32,
    },
    /// An enemy reached the end of the path.
    EnemyLeaked { enemy_id: EnemyId, lives_left: u32 },
    /// A wave began spawning.
    WaveStarted { wave: u32, enemies: u32 },
    /// A tower ability fired.
    AbilityUsed { tower_id: TowerId, ability: Ability },
    /// A milestone was reached for the first time.
    AchievementUnlocked { achievement: Achievement },
    /// Lives ran out.
    GameOver { wave: u32, score: u32 },
}

/// A queued command that was rejected at the tick boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRejection {
    pub command: PlayerCommand,
    pub reason: String,
    pub tick: u64,
}
