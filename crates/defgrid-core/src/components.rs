//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior beyond small helpers.
//! Game logic lives in systems, not components. Entity-handle components
//! (projectiles) live in the sim crate next to the ECS.

use serde::{Deserialize, Serialize};

use crate::catalog::{EnemyKind, TowerKind};
use crate::enums::ParticleKind;
use crate::types::{EnemyId, GridPos, TowerId};

/// A placed tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    pub kind: TowerKind,
    /// Cell the tower occupies. Never changes after placement.
    pub tile: GridPos,
    /// 1..=MAX_TOWER_LEVEL.
    pub level: u32,
    /// Ticks until the ability can be used again.
    pub ability_cooldown: u32,
    /// Enemies killed by this tower's projectiles.
    pub kills: u32,
}

/// Current firing stats of a tower, recomputed on upgrade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: u32,
    pub range: f64,
    /// Ticks between shots.
    pub max_cooldown: u32,
    /// Ticks until the next shot.
    pub cooldown: u32,
}

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    /// Gold granted on death, already scaled by difficulty.
    pub reward: u32,
    pub armor: u32,
    pub flying: bool,
}

/// Where along the route an enemy is.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PathProgress {
    /// Index of the waypoint the enemy last passed.
    pub index: usize,
    /// Fraction of the way to the next waypoint, 0 <= p < 1.
    pub progress: f64,
}

/// Enemy health. `current` never exceeds `max`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

/// Base and effective movement speed (path progress per tick).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Speed {
    pub base: f64,
    pub effective: f64,
}

/// Status effect timers. Frozen takes priority over burning.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    pub frozen_ticks: u32,
    pub burning_ticks: u32,
}

/// Short-lived visual effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub life: u32,
    /// Radius in cells.
    pub size: f64,
}

/// Rising text label (rewards, upgrades, abilities).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub life: u32,
}

impl PathProgress {
    /// Leak-priority measure (index + progress).
    pub fn distance_travelled(&self) -> f64 {
        crate::path::path_progress(self.index, self.progress)
    }
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Apply damage, saturating at zero. Returns true if this blow was lethal.
    pub fn take(&mut self, amount: u32) -> bool {
        let was_alive = self.current > 0;
        self.current = self.current.saturating_sub(amount);
        was_alive && self.current == 0
    }
}
