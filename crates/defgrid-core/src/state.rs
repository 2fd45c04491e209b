//! Game state snapshot and the long-lived career record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{EnemyKind, TowerKind};
use crate::constants::HIGH_SCORE_LIMIT;
use crate::enums::*;
use crate::events::{CommandRejection, Notification};
use crate::types::{EnemyId, GridPos, Position, SimTime, TowerId};

/// Complete visible state returned to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: RunPhase,
    pub map: MapId,
    pub difficulty: Difficulty,
    pub run: RunView,
    pub wave: WaveView,
    pub towers: Vec<TowerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<ParticleView>,
    pub floating_texts: Vec<FloatingTextView>,
    pub achievements: Vec<Achievement>,
    pub notifications: Vec<Notification>,
    pub rejections: Vec<CommandRejection>,
}

/// Economy and progress of the current run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunView {
    pub gold: u32,
    pub lives: u32,
    pub wave: u32,
    pub score: u32,
    pub kills: u32,
    pub selected_tile: Option<GridPos>,
}

/// Wave director status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub phase: WavePhase,
    /// Whole seconds until the next wave (0 when not counting down).
    pub countdown_secs: u32,
    /// Spawns of the current wave not yet released.
    pub pending_spawns: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub tower_id: TowerId,
    pub kind: TowerKind,
    pub tile: GridPos,
    pub level: u32,
    pub damage: u32,
    pub range: f64,
    pub cooldown: u32,
    pub max_cooldown: u32,
    /// Shots per second; `None` for zero-cooldown towers.
    pub fire_rate: Option<f64>,
    pub ability_cooldown: u32,
    pub kills: u32,
    /// Gold for the next level, `None` at max level.
    pub upgrade_cost: Option<u32>,
    pub sell_value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: EnemyId,
    pub kind: EnemyKind,
    pub position: Position,
    pub path_index: usize,
    pub progress: f64,
    pub health: u32,
    pub max_health: u32,
    pub frozen: bool,
    pub burning: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub damage_type: DamageType,
    pub splash_radius: f64,
    pub is_ability: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Position,
    pub kind: ParticleKind,
    pub size: f64,
    pub life: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingTextView {
    pub position: Position,
    pub text: String,
    pub life: u32,
}

/// One entry of the high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    pub wave: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub map: MapId,
}

/// Cumulative statistics that survive restarts and are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerStats {
    pub total_kills: u32,
    pub total_gold_earned: u32,
    pub towers_built: u32,
    pub highest_wave: u32,
    pub achievements: BTreeSet<Achievement>,
    /// Sorted descending by score, at most `HIGH_SCORE_LIMIT` entries.
    pub high_scores: Vec<HighScore>,
}

/// End-of-run figures handed to the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub wave: u32,
    pub score: u32,
    pub kills: u32,
    pub gold_earned: u32,
    pub difficulty: Difficulty,
    pub map: MapId,
}

impl CareerStats {
    /// Insert a score, keeping the table sorted and capped.
    pub fn record_high_score(&mut self, entry: HighScore) {
        self.high_scores.push(entry);
        // Stable sort keeps earlier entries ahead of later equal scores.
        self.high_scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.high_scores.truncate(HIGH_SCORE_LIMIT);
    }

    pub fn best_score(&self) -> Option<u32> {
        self.high_scores.first().map(|h| h.score)
    }
}
